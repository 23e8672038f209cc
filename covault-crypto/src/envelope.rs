//! The `"<tag>:<payload>"` ciphertext envelope.

use crate::error::{CryptoError, CryptoResult};

/// Tag of the legacy hex-encoded scheme. Decrypt-only.
pub const TAG_LEGACY: &str = "1";

/// Tag of the current base64 AEAD scheme.
pub const TAG_CURRENT: &str = "2";

/// Tag of the plaintext passthrough scheme (no keyring configured).
pub const TAG_PLAINTEXT: &str = "pt";

/// Whether a tag is claimed by a built-in scheme.
pub fn is_reserved_tag(tag: &str) -> bool {
    matches!(tag, TAG_LEGACY | TAG_CURRENT | TAG_PLAINTEXT)
}

/// Splits an envelope at the first colon into `(tag, payload)`.
pub fn split(envelope: &str) -> CryptoResult<(&str, &str)> {
    envelope
        .split_once(':')
        .ok_or_else(|| CryptoError::Decryption("envelope has no version tag".into()))
}

/// Joins a tag and payload into envelope form.
pub fn join(tag: &str, payload: &str) -> String {
    format!("{tag}:{payload}")
}
