//! Error types for the encryption layer.

use covault_keys::KeysError;
use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Keyring resolution failed (accessor failure or unknown key version).
    #[error(transparent)]
    Keys(#[from] KeysError),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (bad format, wrong key, or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// A pre-encoded key entry has the wrong length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The envelope carries a version tag no configured strategy understands.
    #[error("no cipher strategy for version tag {0:?}")]
    UnknownVersion(String),

    /// A plaintext ("pt") envelope was met while a keyring is configured.
    /// Accepting it would silently downgrade confidentiality, so it is an error.
    #[error("plaintext envelope rejected: a keyring is configured")]
    UnexpectedPlaintext,

    /// Invalid strategy/keyring configuration, detected at construction.
    #[error("crypto configuration error: {0}")]
    Configuration(String),
}
