//! Pipeline driver and comparison report.

use serde::Serialize;

use optionvault_core::eip712::{address_matches, hash_typed_data, recover_address};
use optionvault_core::{QuoteSigner, Result, WriteOptionQuote};

use crate::vectors::ReferenceVector;

/// Computed pipeline outputs next to their comparison outcome.
///
/// Digest and signature fields are lowercase hex without prefix, the form
/// used for cross-implementation comparison.
#[derive(Debug, Clone, Serialize)]
pub struct CompatReport {
    pub domain_separator: String,
    pub struct_hash: String,
    pub message_hash: String,
    pub signature: String,
    /// Recovered signer as a checksummed `0x` address.
    pub recovered_signer: String,
    pub hash_matches: bool,
    pub signature_matches: bool,
    pub signer_matches: bool,
}

impl CompatReport {
    /// Whether every computed output matched its reference value.
    pub fn matches(&self) -> bool {
        self.hash_matches && self.signature_matches && self.signer_matches
    }
}

/// Run the full pipeline against a reference vector.
///
/// Errors only on pipeline failures (bad key, encoding error); a value
/// mismatch is reported through the returned [`CompatReport`].
pub fn run_reference_check(vector: &ReferenceVector) -> Result<CompatReport> {
    let signer = QuoteSigner::from_private_key(vector.private_key, vector.domain.clone())?;

    let registry = WriteOptionQuote::registry();
    let (separator, struct_hash, digest) =
        hash_typed_data(&registry, &vector.domain, &vector.quote.struct_value())?;

    let signature = signer.sign_digest(&digest)?.as_bytes();
    let recovered = recover_address(&digest, &signature)?;

    let message_hash = hex::encode(digest);
    let signature_hex = hex::encode(signature);

    Ok(CompatReport {
        domain_separator: hex::encode(separator),
        struct_hash: hex::encode(struct_hash),
        hash_matches: message_hash == vector.expected_message_hash,
        signature_matches: signature_hex == vector.expected_signature,
        signer_matches: address_matches(recovered, vector.expected_signer),
        message_hash,
        signature: signature_hex,
        recovered_signer: recovered.to_string(),
    })
}
