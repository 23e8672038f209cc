//! Error types for the record codec and filter layer.

use covault_crypto::CryptoError;
use thiserror::Error;

/// Errors from the record codec and filter layer.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// A wire record is missing required fields. The message lists every
    /// missing field at once.
    #[error("null required record fields: {0}")]
    MissingFields(String),

    /// The server response does not match the expected document shape.
    #[error("response parse error: {0}")]
    Response(String),

    /// A find filter violates a construction rule.
    #[error("invalid find filter: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RecordsResult<T> = Result<T, RecordsError>;
