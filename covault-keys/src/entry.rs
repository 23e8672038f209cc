//! A single versioned secret.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One versioned secret in a keyring.
///
/// The material is either a password (run through PBKDF2 before use) or,
/// when `pre_encoded` is set, a raw 32-byte symmetric key used as-is.
/// Entries flagged `for_custom_encryption` are reserved for externally
/// supplied cipher strategies and are never fed to the built-in AEAD path.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretEntry {
    material: Vec<u8>,
    #[zeroize(skip)]
    version: u32,
    #[zeroize(skip)]
    pre_encoded: bool,
    #[zeroize(skip)]
    for_custom_encryption: bool,
}

impl SecretEntry {
    /// Creates a password-style entry whose material is key-derived before use.
    pub fn new(material: impl Into<Vec<u8>>, version: u32) -> Self {
        Self {
            material: material.into(),
            version,
            pre_encoded: false,
            for_custom_encryption: false,
        }
    }

    /// Creates an entry whose material already is a raw symmetric key.
    pub fn pre_encoded(material: impl Into<Vec<u8>>, version: u32) -> Self {
        Self {
            material: material.into(),
            version,
            pre_encoded: true,
            for_custom_encryption: false,
        }
    }

    /// Creates an entry usable only by custom cipher strategies.
    pub fn for_custom_encryption(material: impl Into<Vec<u8>>, version: u32) -> Self {
        Self {
            material: material.into(),
            version,
            pre_encoded: false,
            for_custom_encryption: true,
        }
    }

    /// The raw secret material.
    pub fn material(&self) -> &[u8] {
        &self.material
    }

    /// The entry's version within its keyring.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Whether the material is a ready-to-use symmetric key (skips derivation).
    pub fn is_pre_encoded_key(&self) -> bool {
        self.pre_encoded
    }

    /// Whether this entry is restricted to custom cipher strategies.
    pub fn is_for_custom_encryption(&self) -> bool {
        self.for_custom_encryption
    }
}

impl fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretEntry")
            .field("material", &"[REDACTED]")
            .field("version", &self.version)
            .field("pre_encoded", &self.pre_encoded)
            .field("for_custom_encryption", &self.for_custom_encryption)
            .finish()
    }
}
