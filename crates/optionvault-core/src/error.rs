//! Error types for the OptionVault signing pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("unsupported Solidity type: {0}")]
    UnsupportedType(String),

    #[error("value out of range for {ty}: {value}")]
    Range { ty: String, value: String },

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signing error: {message}")]
    Signing { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
