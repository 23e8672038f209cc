//! Strategy selection, envelope dispatch, and search hashing.

use crate::cipher;
use crate::envelope;
use crate::error::{CryptoError, CryptoResult};
use crate::strategy::CipherStrategy;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use covault_keys::KeyringAccessor;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Probe text round-tripped through every custom strategy at construction.
const VALIDATION_PROBE: &str = "covault custom encryption probe";

/// Selects the cipher scheme for new encryptions, dispatches decryption by
/// envelope tag, and computes the deterministic keyed hash for searchable
/// fields.
///
/// Stateless apart from its configuration: the keyring is re-resolved through
/// the accessor on every operation and never cached, so rotated secrets take
/// effect immediately. Safe to share across threads.
pub struct CryptoManager {
    accessor: Option<Arc<dyn KeyringAccessor>>,
    env_id: String,
    normalize_keys: bool,
    strategies: HashMap<String, Arc<dyn CipherStrategy>>,
    current_custom: Option<String>,
}

impl CryptoManager {
    /// Builds a manager, failing fast on configuration errors.
    ///
    /// Validation, before any request is made:
    /// - custom strategies require a keyring accessor;
    /// - strategy tags must be non-empty, pairwise distinct, and distinct from
    ///   the reserved tags `"1"`, `"2"`, `"pt"`;
    /// - at most one strategy may be marked current; if one is, the keyring's
    ///   current entry must be flagged for custom encryption, and a
    ///   custom-flagged current entry conversely requires a current strategy;
    /// - custom strategies and custom-flagged entries must reconcile: each
    ///   side requires at least one counterpart, and every strategy must
    ///   round-trip a probe string with a matching entry.
    pub fn new(
        accessor: Option<Arc<dyn KeyringAccessor>>,
        env_id: impl Into<String>,
        custom_strategies: Vec<Arc<dyn CipherStrategy>>,
        normalize_keys: bool,
    ) -> CryptoResult<Self> {
        if accessor.is_none() && !custom_strategies.is_empty() {
            return Err(CryptoError::Configuration(
                "custom encryption requires a keyring accessor".into(),
            ));
        }

        let mut strategies: HashMap<String, Arc<dyn CipherStrategy>> = HashMap::new();
        let mut current_custom = None;
        for strategy in custom_strategies {
            let tag = strategy.version().to_string();
            if tag.is_empty() {
                return Err(CryptoError::Configuration(
                    "custom strategy version tag can't be empty".into(),
                ));
            }
            if envelope::is_reserved_tag(&tag) {
                return Err(CryptoError::Configuration(format!(
                    "custom strategy version tag {tag:?} collides with a built-in tag"
                )));
            }
            if strategy.is_current() {
                if current_custom.is_some() {
                    return Err(CryptoError::Configuration(
                        "more than one cipher strategy is marked current".into(),
                    ));
                }
                current_custom = Some(tag.clone());
            }
            if strategies.insert(tag.clone(), strategy).is_some() {
                return Err(CryptoError::Configuration(format!(
                    "duplicate custom strategy version tag {tag:?}"
                )));
            }
        }

        let manager = Self {
            accessor,
            env_id: env_id.into(),
            normalize_keys,
            strategies,
            current_custom,
        };
        manager.validate_custom_configuration()?;
        debug!(
            custom_strategies = manager.strategies.len(),
            encrypted = manager.is_encrypted(),
            "crypto manager initialized"
        );
        Ok(manager)
    }

    fn validate_custom_configuration(&self) -> CryptoResult<()> {
        let Some(accessor) = &self.accessor else {
            return Ok(());
        };
        let keyring = accessor.keyring()?;

        if self.strategies.is_empty() {
            if keyring.has_custom_entries() {
                return Err(CryptoError::Configuration(
                    "secret entries are flagged for custom encryption but no custom strategies are configured".into(),
                ));
            }
            return Ok(());
        }
        if !keyring.has_custom_entries() {
            return Err(CryptoError::Configuration(
                "custom strategies require at least one secret entry flagged for custom encryption"
                    .into(),
            ));
        }
        if self.current_custom.is_some() && !keyring.current_entry().is_for_custom_encryption() {
            return Err(CryptoError::Configuration(
                "current secret entry is not flagged for custom encryption".into(),
            ));
        }
        // the mirror case: custom-only material must never reach the built-in
        // AEAD path, so a custom-flagged current entry needs a current strategy
        if self.current_custom.is_none() && keyring.current_entry().is_for_custom_encryption() {
            return Err(CryptoError::Configuration(
                "current secret entry is flagged for custom encryption but no custom strategy is marked current".into(),
            ));
        }

        // Every strategy must round-trip with a matching custom entry.
        for (tag, strategy) in &self.strategies {
            let entry = if keyring.current_entry().is_for_custom_encryption() {
                keyring.current_entry()
            } else {
                keyring.custom_entries().next().ok_or_else(|| {
                    CryptoError::Configuration(
                        "no secret entry available for custom strategy validation".into(),
                    )
                })?
            };
            let encrypted = strategy.encrypt(VALIDATION_PROBE, entry).map_err(|e| {
                CryptoError::Configuration(format!("custom strategy {tag:?} failed to encrypt: {e}"))
            })?;
            let decrypted = strategy.decrypt(&encrypted, entry).map_err(|e| {
                CryptoError::Configuration(format!("custom strategy {tag:?} failed to decrypt: {e}"))
            })?;
            if decrypted != VALIDATION_PROBE {
                return Err(CryptoError::Configuration(format!(
                    "custom strategy {tag:?} did not round-trip its own ciphertext"
                )));
            }
        }
        Ok(())
    }

    /// Whether a keyring accessor is configured (plaintext passthrough otherwise).
    pub fn is_encrypted(&self) -> bool {
        self.accessor.is_some()
    }

    /// The key version that new encryptions will use.
    pub fn current_secret_version(&self) -> CryptoResult<u32> {
        let accessor = self.accessor.as_ref().ok_or_else(|| {
            CryptoError::Configuration("no keyring configured, no current key version".into())
        })?;
        Ok(accessor.keyring()?.current_version())
    }

    /// Encrypts plaintext with the current strategy.
    ///
    /// Returns the envelope and the key version used, `None` when running in
    /// plaintext passthrough mode (no keyring).
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<(String, Option<u32>)> {
        let Some(accessor) = &self.accessor else {
            let payload = BASE64.encode(plaintext.as_bytes());
            return Ok((envelope::join(envelope::TAG_PLAINTEXT, &payload), None));
        };
        let keyring = accessor.keyring()?;
        let entry = keyring.current_entry();

        if let Some(tag) = &self.current_custom {
            let strategy = &self.strategies[tag];
            let payload = strategy.encrypt(plaintext, entry)?;
            return Ok((envelope::join(tag, &payload), Some(entry.version())));
        }

        let packed = cipher::encrypt_packed(entry, plaintext)?;
        let payload = BASE64.encode(&packed);
        Ok((
            envelope::join(envelope::TAG_CURRENT, &payload),
            Some(entry.version()),
        ))
    }

    /// Decrypts an envelope, dispatching on its version tag.
    ///
    /// `key_version` is the version recorded with the stored record (0 for
    /// records written before versioning existed).
    pub fn decrypt(&self, envelope_str: &str, key_version: u32) -> CryptoResult<String> {
        let (tag, payload) = envelope::split(envelope_str)?;

        if tag == envelope::TAG_PLAINTEXT {
            if self.accessor.is_some() {
                return Err(CryptoError::UnexpectedPlaintext);
            }
            let bytes = BASE64
                .decode(payload)
                .map_err(|e| CryptoError::Decryption(format!("invalid base64 payload: {e}")))?;
            return String::from_utf8(bytes)
                .map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {e}")));
        }

        let Some(accessor) = &self.accessor else {
            return Err(CryptoError::Decryption(format!(
                "no keyring configured, can't decrypt envelope with tag {tag:?}"
            )));
        };
        let keyring = accessor.keyring()?;

        let entry = keyring.entry(key_version)?;

        match tag {
            envelope::TAG_LEGACY => {
                let packed = hex::decode(payload)
                    .map_err(|e| CryptoError::Decryption(format!("invalid hex payload: {e}")))?;
                cipher::decrypt_packed(entry, &packed)
            }
            envelope::TAG_CURRENT => {
                let packed = BASE64
                    .decode(payload)
                    .map_err(|e| CryptoError::Decryption(format!("invalid base64 payload: {e}")))?;
                cipher::decrypt_packed(entry, &packed)
            }
            custom => match self.strategies.get(custom) {
                Some(strategy) => strategy.decrypt(payload, entry),
                None => Err(CryptoError::UnknownVersion(custom.to_string())),
            },
        }
    }

    /// Computes the deterministic keyed hash used for equality-searchable
    /// fields: hex SHA-256 of `"<value>:<environment id>"`.
    ///
    /// Scoping the hash to the environment id prevents correlating the same
    /// value across environments. With `normalize_keys`, values are lowercased
    /// first so lookups become case-insensitive.
    pub fn create_key_hash(&self, key: &str) -> String {
        let normalized: Cow<'_, str> = if self.normalize_keys {
            Cow::Owned(key.to_lowercase())
        } else {
            Cow::Borrowed(key)
        };
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update(b":");
        hasher.update(self.env_id.as_bytes());
        hex::encode(hasher.finalize())
    }
}
