//! OptionVault Core Library
//!
//! EIP-712 typed data encoding, signing, and verification for off-chain
//! OptionVault quotes. The pipeline is a straight-line composition of pure
//! functions: type registry -> field encoder -> struct hash -> domain
//! separator -> signing digest -> signature / recovery.

pub mod eip712;
pub mod error;
pub mod quote;

pub use eip712::{Eip712Domain, QuoteSigner, TypeRegistry};
pub use error::{Error, Result};
pub use quote::{QuoteBuilder, SignedQuote, WriteOptionQuote};
