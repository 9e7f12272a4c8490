//! EIP-712 signing domain for OptionVault quotes.
//!
//! The domain separator binds every signature to one deployment of the
//! vault: name, version, chain id, and verifying contract address. Signer
//! and verifier must agree on all four fields.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde_json::Value;

use super::value::{parse_uint, FieldValue, StructValue};
use crate::error::{Error, Result};

/// Canonical type string of the well-known `EIP712Domain` struct.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Chain ID of the local Anvil/Hardhat development chain.
pub const ANVIL_CHAIN_ID: u64 = 31337;

/// OptionVault contract address on the local development chain.
pub const OPTION_VAULT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// EIP-712 domain separator parameters.
///
/// Immutable once constructed; construct one per signing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Create the domain for the OptionVault deployment on the local
    /// development chain.
    pub fn option_vault() -> Self {
        Self {
            name: "OptionVault".to_string(),
            version: "1".to_string(),
            chain_id: U256::from(ANVIL_CHAIN_ID),
            verifying_contract: OPTION_VAULT_ADDRESS
                .parse()
                .expect("Invalid OptionVault address"),
        }
    }

    /// Create a domain with custom parameters.
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Parse a domain from a JSON document with fields
    /// `name`, `version`, `chainId`, `verifyingContract`.
    pub fn from_json(doc: &Value) -> Result<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| Error::Encoding("expected a JSON object for EIP712Domain".into()))?;
        if obj.len() != 4 {
            return Err(Error::Encoding(format!(
                "EIP712Domain declares 4 fields, document has {}",
                obj.len()
            )));
        }

        let field_str = |key: &str| -> Result<&str> {
            obj.get(key)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Encoding(format!("missing domain field {key}")))
        };

        let chain_id = obj
            .get("chainId")
            .ok_or_else(|| Error::Encoding("missing domain field chainId".into()))
            .and_then(|raw| parse_uint("uint256", raw))?;
        let contract = field_str("verifyingContract")?;
        let verifying_contract = contract
            .parse::<Address>()
            .map_err(|e| Error::Encoding(format!("invalid address {contract:?}: {e}")))?;

        Ok(Self {
            name: field_str("name")?.to_string(),
            version: field_str("version")?.to_string(),
            chain_id,
            verifying_contract,
        })
    }

    /// Compute the EIP-712 domain separator hash.
    ///
    /// String fields contribute their keccak256 hash; `chainId` and the
    /// address are padded to full 32-byte slots. Independent of any message
    /// struct value, so it can be computed once per domain.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = keccak256(EIP712_DOMAIN_TYPE.as_bytes());

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }

    /// The domain as a generic struct value over the built-in
    /// `EIP712Domain` type.
    pub fn struct_value(&self) -> StructValue {
        StructValue::new(super::registry::DOMAIN_TYPE_NAME)
            .with_field("name", FieldValue::String(self.name.clone()))
            .with_field("version", FieldValue::String(self.version.clone()))
            .with_field("chainId", FieldValue::Uint(self.chain_id))
            .with_field(
                "verifyingContract",
                FieldValue::Address(self.verifying_contract),
            )
    }
}
