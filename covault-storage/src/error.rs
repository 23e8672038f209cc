//! Error types for the storage facade.

use thiserror::Error;

/// Errors from the storage facade.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Caller misuse: empty arguments, invalid limits, conflicting
    /// configuration. Never worth retrying.
    #[error("{0}")]
    Client(String),

    /// The transport or the server misbehaved.
    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Keys(#[from] covault_keys::KeysError),

    #[error(transparent)]
    Crypto(#[from] covault_crypto::CryptoError),

    #[error(transparent)]
    Records(#[from] covault_records::RecordsError),
}

pub type StorageResult<T> = Result<T, StorageError>;
