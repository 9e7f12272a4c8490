//! EIP-712 typed data pipeline.
//!
//! This module implements typed structured data hashing and signing for
//! off-chain quote messages.
//!
//! # Architecture
//!
//! ```text
//! TypeRegistry ──► canonical type string ──► type hash
//!       │
//!       ▼
//! StructValue ──► encode_field (32-byte slots) ──► struct_hash
//!       │                                              │
//! Eip712Domain ──► separator ──────────┐               │
//!                                      ▼               ▼
//!                            signing_digest(0x19 0x01 ‖ sep ‖ hash)
//!                                      │
//!                      QuoteSigner ────┴──── recover_address
//! ```
//!
//! Every stage is a pure function of its inputs; encoding and type errors
//! abort before any hashing happens.

pub mod domain;
pub mod encoder;
pub mod registry;
pub mod signer;
pub mod value;
pub mod verifier;

pub use domain::Eip712Domain;
pub use encoder::{encode_field, struct_hash};
pub use registry::{FieldDef, TypeDefinition, TypeRegistry};
pub use signer::QuoteSigner;
pub use value::{FieldValue, StructValue};
pub use verifier::{address_matches, recover_address};

use alloy_primitives::{keccak256, B256};
use alloy_sol_types::SolValue;

use crate::error::Result;

/// Compute the EIP-712 signing digest:
/// `keccak256("\x19\x01" ++ domainSeparator ++ structHash)`.
///
/// The two leading bytes are a fixed protocol prefix that separates typed
/// data signing from plain message signing. They are not configurable.
pub fn signing_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let prefix = [0x19, 0x01];
    let data = (prefix, domain_separator, struct_hash).abi_encode_packed();
    keccak256(&data)
}

/// Hash a typed struct value under a domain in one call.
///
/// Returns `(domain_separator, struct_hash, signing_digest)` so callers can
/// surface all three digests for cross-implementation comparison.
pub fn hash_typed_data(
    registry: &TypeRegistry,
    domain: &Eip712Domain,
    value: &StructValue,
) -> Result<(B256, B256, B256)> {
    let separator = domain.separator();
    let hash = struct_hash(registry, value)?;
    Ok((separator, hash, signing_digest(separator, hash)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_signing_digest_prefix() {
        let sep = B256::repeat_byte(0x11);
        let hash = B256::repeat_byte(0x22);

        let mut expected = Vec::with_capacity(66);
        expected.extend_from_slice(&[0x19, 0x01]);
        expected.extend_from_slice(sep.as_slice());
        expected.extend_from_slice(hash.as_slice());

        assert_eq!(signing_digest(sep, hash), keccak256(&expected));
    }

    #[test]
    fn test_signing_digest_is_order_sensitive() {
        let a = b256!("0000000000000000000000000000000000000000000000000000000000000001");
        let b = b256!("0000000000000000000000000000000000000000000000000000000000000002");

        assert_ne!(signing_digest(a, b), signing_digest(b, a));
    }
}
