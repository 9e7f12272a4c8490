//! Signature verification and signer recovery.
//!
//! Recovery is a pure function of digest and signature; no key material is
//! involved. The recovery id must already be in Ethereum's `{27, 28}`
//! convention, matching what the signer emits.

use alloy_primitives::{b256, Address, Signature, B256, U256};

use crate::error::{Error, Result};

/// secp256k1 group order; `r` and `s` must be non-zero and below it.
const SECP256K1_ORDER: B256 =
    b256!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

/// Recover the signer address from a digest and a 65-byte `r ‖ s ‖ v`
/// signature.
///
/// # Errors
///
/// Returns `MalformedSignature` if the signature is not 65 bytes, `v` is
/// outside `{27, 28}`, or `r`/`s` are zero or not below the curve order.
pub fn recover_address(digest: &B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != 65 {
        return Err(Error::MalformedSignature(format!(
            "expected 65 bytes, got {}",
            signature.len()
        )));
    }

    let r = U256::from_be_slice(&signature[..32]);
    let s = U256::from_be_slice(&signature[32..64]);
    let v = signature[64];

    if v != 27 && v != 28 {
        return Err(Error::MalformedSignature(format!(
            "recovery id must be 27 or 28, got {v}"
        )));
    }
    let order = U256::from_be_bytes(SECP256K1_ORDER.0);
    if r.is_zero() || s.is_zero() || r >= order || s >= order {
        return Err(Error::MalformedSignature(
            "r and s must be non-zero and below the curve order".to_string(),
        ));
    }

    Signature::new(r, s, v == 28)
        .recover_address_from_prehash(digest)
        .map_err(|e| Error::MalformedSignature(e.to_string()))
}

/// Case-insensitive address comparison against a hex string, with or
/// without `0x` prefix. Mixed-case checksums carry no weight for equality.
pub fn address_matches(address: Address, expected: &str) -> bool {
    let expected = expected.trim().trim_start_matches("0x");
    hex::encode(address.as_slice()).eq_ignore_ascii_case(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::domain::Eip712Domain;
    use crate::eip712::signer::QuoteSigner;

    const TEST_PRIVATE_KEY: &str =
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const TEST_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn signed(digest: B256) -> [u8; 65] {
        QuoteSigner::from_private_key(TEST_PRIVATE_KEY, Eip712Domain::option_vault())
            .unwrap()
            .sign_digest(&digest)
            .unwrap()
            .as_bytes()
    }

    #[test]
    fn test_round_trip_recovery() {
        for byte in [0x00u8, 0x42, 0xff] {
            let digest = B256::repeat_byte(byte);
            let recovered = recover_address(&digest, &signed(digest)).unwrap();
            assert!(address_matches(recovered, TEST_ADDRESS));
        }
    }

    #[test]
    fn test_recovery_differs_on_tampered_digest() {
        let digest = B256::repeat_byte(0x42);
        let sig = signed(digest);

        let recovered = recover_address(&B256::repeat_byte(0x43), &sig).unwrap();
        assert!(!address_matches(recovered, TEST_ADDRESS));
    }

    #[test]
    fn test_rejects_bad_recovery_id() {
        let digest = B256::repeat_byte(0x42);
        let mut sig = signed(digest);

        for v in [0u8, 1, 26, 29] {
            sig[64] = v;
            assert!(matches!(
                recover_address(&digest, &sig).unwrap_err(),
                Error::MalformedSignature(_)
            ));
        }
    }

    #[test]
    fn test_rejects_zero_and_out_of_range_scalars() {
        let digest = B256::repeat_byte(0x42);

        let mut zero_r = signed(digest);
        zero_r[..32].fill(0);
        assert!(matches!(
            recover_address(&digest, &zero_r).unwrap_err(),
            Error::MalformedSignature(_)
        ));

        let mut big_s = signed(digest);
        big_s[32..64].copy_from_slice(SECP256K1_ORDER.as_slice());
        assert!(matches!(
            recover_address(&digest, &big_s).unwrap_err(),
            Error::MalformedSignature(_)
        ));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let digest = B256::repeat_byte(0x42);
        assert!(matches!(
            recover_address(&digest, &[0u8; 64]).unwrap_err(),
            Error::MalformedSignature(_)
        ));
    }

    #[test]
    fn test_address_matches_is_case_insensitive() {
        let address = TEST_ADDRESS.parse::<Address>().unwrap();

        assert!(address_matches(address, TEST_ADDRESS));
        assert!(address_matches(address, &TEST_ADDRESS.to_lowercase()));
        assert!(address_matches(
            address,
            TEST_ADDRESS.trim_start_matches("0x")
        ));
        assert!(!address_matches(
            address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        ));
    }
}
