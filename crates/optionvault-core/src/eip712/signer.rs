//! Quote signing for OptionVault.
//!
//! Wraps a local secp256k1 key and a signing domain, and produces
//! recoverable signatures over EIP-712 digests. Signing is fully
//! synchronous and deterministic (RFC 6979 nonces): the same digest and
//! key always yield the same `(r, s, v)` bytes.

use std::str::FromStr;

use alloy_primitives::{Address, Signature, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use super::domain::Eip712Domain;
use super::encoder::struct_hash;
use super::registry::TypeRegistry;
use super::signing_digest;
use super::value::StructValue;
use crate::error::{Error, Result};
use crate::quote::{SignedQuote, WriteOptionQuote};

/// Signs OptionVault quotes under a fixed EIP-712 domain.
///
/// The private scalar lives only inside the wrapped signer and is zeroized
/// when the signer is dropped; nothing here copies it out or logs it.
#[derive(Clone)]
pub struct QuoteSigner {
    signer: PrivateKeySigner,
    domain: Eip712Domain,
}

impl QuoteSigner {
    /// Create a quote signer from an existing local signer.
    pub fn new(signer: PrivateKeySigner, domain: Eip712Domain) -> Self {
        Self { signer, domain }
    }

    /// Create a quote signer from a hex-encoded private key, optionally
    /// `0x`-prefixed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the key is not 32 bytes of hex or is not a
    /// valid non-zero scalar below the secp256k1 group order.
    pub fn from_private_key(key: &str, domain: Eip712Domain) -> Result<Self> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;

        Ok(Self::new(signer, domain))
    }

    /// The signer's Ethereum address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte digest, returning a recoverable signature.
    ///
    /// The recovery id follows Ethereum's `{27, 28}` convention in the
    /// 65-byte `r ‖ s ‖ v` serialization.
    pub fn sign_digest(&self, digest: &B256) -> Result<Signature> {
        self.signer
            .sign_hash_sync(digest)
            .map_err(|e| Error::Signing {
                message: e.to_string(),
            })
    }

    /// Sign an arbitrary registered struct value under this signer's domain.
    pub fn sign_struct(&self, registry: &TypeRegistry, value: &StructValue) -> Result<Signature> {
        let hash = struct_hash(registry, value)?;
        let digest = signing_digest(self.domain.separator(), hash);
        self.sign_digest(&digest)
    }

    /// Sign a quote and return it in submission form.
    pub fn sign_quote(&self, quote: &WriteOptionQuote) -> Result<SignedQuote> {
        let registry = WriteOptionQuote::registry();
        let hash = struct_hash(&registry, &quote.struct_value())?;
        let digest = signing_digest(self.domain.separator(), hash);

        tracing::debug!(
            digest = %hex::encode(digest),
            signer = %self.address(),
            "signing quote digest"
        );

        let signature = self.sign_digest(&digest)?;
        Ok(SignedQuote::from_quote(quote, self.address(), digest, &signature))
    }
}

impl std::fmt::Debug for QuoteSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material in debug output
        f.debug_struct("QuoteSigner")
            .field("address", &format!("{}", self.address()))
            .field("domain", &self.domain.name)
            .finish()
    }
}
