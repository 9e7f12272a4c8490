//! Compatibility oracle for OptionVault quote signatures.
//!
//! Drives the full EIP-712 pipeline with fixed inputs and compares every
//! output against literal reference values produced by the other
//! OptionVault implementations. A mismatch is reported, never raised: the
//! pipeline stays usable after a failed comparison.

pub mod oracle;
pub mod vectors;

pub use oracle::{run_reference_check, CompatReport};
pub use vectors::ReferenceVector;
