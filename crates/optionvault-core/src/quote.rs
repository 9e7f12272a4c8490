//! Quote types for OptionVault EIP-712 signing.
//!
//! Defines the `WriteOption` quote message signed off-chain by an option
//! writer, plus its submission form.

use alloy_primitives::{Address, Signature, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::eip712::encoder::struct_hash;
use crate::eip712::registry::{TypeDefinition, TypeRegistry};
use crate::eip712::value::{FieldValue, StructValue};
use crate::error::{Error, Result};

/// An off-chain quote for writing an option.
///
/// All amounts are in base units of the respective token; timestamps are
/// unix seconds. Matches the `WriteOption` struct checked by the vault
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptionQuote {
    /// Strike price in quote-token base units.
    pub strike: U256,
    /// Option expiry timestamp.
    pub expiry: U256,
    /// Premium per underlying unit.
    pub premium_per_unit: U256,
    /// Smallest deposit this quote covers.
    pub min_deposit: U256,
    /// Largest deposit this quote covers.
    pub max_deposit: U256,
    /// Quote validity deadline.
    pub valid_until: U256,
    /// Writer-chosen quote identifier.
    pub quote_id: U256,
}

impl WriteOptionQuote {
    pub const TYPE_NAME: &'static str = "WriteOption";

    /// The quote's EIP-712 type definition.
    pub fn type_definition() -> TypeDefinition {
        TypeDefinition::new(
            Self::TYPE_NAME,
            &[
                ("strike", "uint256"),
                ("expiry", "uint256"),
                ("premiumPerUnit", "uint256"),
                ("minDeposit", "uint256"),
                ("maxDeposit", "uint256"),
                ("validUntil", "uint256"),
                ("quoteId", "uint256"),
            ],
        )
    }

    /// A registry holding the built-in types plus `WriteOption`.
    pub fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(Self::type_definition());
        registry
    }

    pub fn builder() -> QuoteBuilder {
        QuoteBuilder::new()
    }

    /// Parse a quote from a JSON document keyed by the EIP-712 field names.
    pub fn from_json(doc: &Value) -> Result<Self> {
        let registry = Self::registry();
        let value = StructValue::from_json(&registry, Self::TYPE_NAME, doc)?;

        let field = |name: &str| -> Result<U256> {
            match value.get(name) {
                Some(FieldValue::Uint(v)) => Ok(*v),
                _ => Err(Error::Encoding(format!("missing uint field {name}"))),
            }
        };

        Ok(Self {
            strike: field("strike")?,
            expiry: field("expiry")?,
            premium_per_unit: field("premiumPerUnit")?,
            min_deposit: field("minDeposit")?,
            max_deposit: field("maxDeposit")?,
            valid_until: field("validUntil")?,
            quote_id: field("quoteId")?,
        })
    }

    /// The quote as a generic struct value, fields in declaration order.
    pub fn struct_value(&self) -> StructValue {
        StructValue::new(Self::TYPE_NAME)
            .with_field("strike", FieldValue::Uint(self.strike))
            .with_field("expiry", FieldValue::Uint(self.expiry))
            .with_field("premiumPerUnit", FieldValue::Uint(self.premium_per_unit))
            .with_field("minDeposit", FieldValue::Uint(self.min_deposit))
            .with_field("maxDeposit", FieldValue::Uint(self.max_deposit))
            .with_field("validUntil", FieldValue::Uint(self.valid_until))
            .with_field("quoteId", FieldValue::Uint(self.quote_id))
    }

    /// Compute the EIP-712 struct hash for this quote.
    pub fn struct_hash(&self) -> Result<B256> {
        struct_hash(&Self::registry(), &self.struct_value())
    }
}

/// Fluent builder for [`WriteOptionQuote`].
#[derive(Debug, Clone, Default)]
pub struct QuoteBuilder {
    strike: Option<U256>,
    expiry: Option<U256>,
    premium_per_unit: Option<U256>,
    min_deposit: Option<U256>,
    max_deposit: Option<U256>,
    valid_until: Option<U256>,
    quote_id: U256,
}

impl QuoteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strike(mut self, strike: U256) -> Self {
        self.strike = Some(strike);
        self
    }

    pub fn expiry(mut self, expiry: U256) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn premium_per_unit(mut self, premium: U256) -> Self {
        self.premium_per_unit = Some(premium);
        self
    }

    pub fn min_deposit(mut self, min_deposit: U256) -> Self {
        self.min_deposit = Some(min_deposit);
        self
    }

    pub fn max_deposit(mut self, max_deposit: U256) -> Self {
        self.max_deposit = Some(max_deposit);
        self
    }

    pub fn valid_until(mut self, valid_until: U256) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    pub fn quote_id(mut self, quote_id: U256) -> Self {
        self.quote_id = quote_id;
        self
    }

    /// Build the quote.
    ///
    /// Returns None if required fields are missing.
    pub fn build(self) -> Option<WriteOptionQuote> {
        Some(WriteOptionQuote {
            strike: self.strike?,
            expiry: self.expiry?,
            premium_per_unit: self.premium_per_unit?,
            min_deposit: self.min_deposit?,
            max_deposit: self.max_deposit?,
            valid_until: self.valid_until?,
            quote_id: self.quote_id,
        })
    }
}

/// A signed quote ready for distribution.
///
/// Numeric fields are decimal strings so downstream JSON consumers never
/// hit integer precision limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedQuote {
    pub strike: String,
    pub expiry: String,
    pub premium_per_unit: String,
    pub min_deposit: String,
    pub max_deposit: String,
    pub valid_until: String,
    pub quote_id: String,
    /// Writer address as a checksummed hex string.
    pub signer: String,
    /// EIP-712 signing digest as a `0x`-prefixed hex string.
    pub message_hash: String,
    /// 65-byte `r ‖ s ‖ v` signature as a `0x`-prefixed hex string.
    pub signature: String,
}

impl SignedQuote {
    /// Create from a quote and its signature.
    pub fn from_quote(
        quote: &WriteOptionQuote,
        signer: Address,
        digest: B256,
        signature: &Signature,
    ) -> Self {
        Self {
            strike: quote.strike.to_string(),
            expiry: quote.expiry.to_string(),
            premium_per_unit: quote.premium_per_unit.to_string(),
            min_deposit: quote.min_deposit.to_string(),
            max_deposit: quote.max_deposit.to_string(),
            valid_until: quote.valid_until.to_string(),
            quote_id: quote.quote_id.to_string(),
            signer: signer.to_string(),
            message_hash: format!("0x{}", hex::encode(digest)),
            signature: format!("0x{}", hex::encode(signature.as_bytes())),
        }
    }
}
