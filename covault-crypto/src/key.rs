//! Key derivation for the built-in AEAD scheme.
//!
//! Password-style secret entries are stretched with PBKDF2-HMAC-SHA512 using
//! the per-envelope random salt; pre-encoded entries are used verbatim.

use crate::error::{CryptoError, CryptoResult};
use covault_keys::SecretEntry;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for AES-256-GCM).
pub const KEY_SIZE: usize = 32;

/// Size of the per-envelope key-derivation salt in bytes.
pub const SALT_SIZE: usize = 64;

/// PBKDF2 iteration count. Fixed by the wire format; changing it breaks
/// decryption of existing records.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives an AES key from secret material and a salt via PBKDF2-HMAC-SHA512.
pub fn derive_key(material: &[u8], salt: &[u8]) -> DerivedKey {
    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha512>(material, salt, PBKDF2_ITERATIONS, &mut bytes);
    DerivedKey { bytes }
}

/// Resolves the AES key for a secret entry.
///
/// Pre-encoded entries must carry exactly [`KEY_SIZE`] bytes; password entries
/// are derived with the supplied salt.
pub fn key_for_entry(entry: &SecretEntry, salt: &[u8]) -> CryptoResult<DerivedKey> {
    if entry.is_pre_encoded_key() {
        let material = entry.material();
        if material.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: material.len(),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(material);
        Ok(DerivedKey { bytes })
    } else {
        Ok(derive_key(entry.material(), salt))
    }
}
