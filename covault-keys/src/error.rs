//! Error types for keyring handling.

use thiserror::Error;

/// Result type for keyring operations.
pub type KeysResult<T> = Result<T, KeysError>;

/// Errors that can occur while building or resolving a keyring.
#[derive(Debug, Error)]
pub enum KeysError {
    /// No secret entry exists for the requested version.
    #[error("no secret entry for key version {version}")]
    KeyNotFound { version: u32 },

    /// Two entries were supplied with the same version.
    #[error("duplicate secret entry version {0}")]
    DuplicateVersion(u32),

    /// The designated current version has no matching entry.
    #[error("current version {0} has no matching secret entry")]
    CurrentVersionMissing(u32),

    /// The secrets-data bootstrap document could not be parsed.
    #[error("invalid secrets data: {0}")]
    InvalidSecretsData(String),

    /// The keyring accessor itself failed.
    #[error("keyring accessor failed: {0}")]
    Accessor(String),
}
