//! Immutable set of versioned secrets with a designated current version.

use crate::entry::SecretEntry;
use crate::error::{KeysError, KeysResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Version assigned by the password bootstrap helper.
const DEFAULT_VERSION: u32 = 0;

/// An immutable map of secret versions to entries.
///
/// Invariants, enforced at construction: versions are unique (they need not be
/// contiguous), and `current_version` references an existing entry.
#[derive(Debug, Clone)]
pub struct Keyring {
    entries: BTreeMap<u32, SecretEntry>,
    current_version: u32,
}

impl Keyring {
    /// Builds a keyring, validating version uniqueness and the current marker.
    pub fn new(entries: Vec<SecretEntry>, current_version: u32) -> KeysResult<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let version = entry.version();
            if map.insert(version, entry).is_some() {
                return Err(KeysError::DuplicateVersion(version));
            }
        }
        if !map.contains_key(&current_version) {
            return Err(KeysError::CurrentVersionMissing(current_version));
        }
        Ok(Self {
            entries: map,
            current_version,
        })
    }

    /// Builds a single-entry keyring from a plain password (version 0).
    pub fn from_password(password: &str) -> Self {
        let entry = SecretEntry::new(password.as_bytes().to_vec(), DEFAULT_VERSION);
        Self {
            entries: BTreeMap::from([(DEFAULT_VERSION, entry)]),
            current_version: DEFAULT_VERSION,
        }
    }

    /// Parses the secrets-data bootstrap document:
    ///
    /// ```json
    /// {
    ///   "currentVersion": 1,
    ///   "secrets": [
    ///     {"secret": "password", "version": 1, "isKey": false, "isForCustomEncryption": false}
    ///   ]
    /// }
    /// ```
    pub fn from_json(json: &str) -> KeysResult<Self> {
        let doc: SecretsDocument = serde_json::from_str(json)
            .map_err(|e| KeysError::InvalidSecretsData(e.to_string()))?;
        let entries = doc
            .secrets
            .into_iter()
            .map(|secret| {
                let material = secret.secret.into_bytes();
                if secret.is_key {
                    SecretEntry::pre_encoded(material, secret.version)
                } else if secret.is_for_custom_encryption {
                    SecretEntry::for_custom_encryption(material, secret.version)
                } else {
                    SecretEntry::new(material, secret.version)
                }
            })
            .collect();
        Self::new(entries, doc.current_version)
    }

    /// Resolves the entry for a specific version.
    pub fn entry(&self, version: u32) -> KeysResult<&SecretEntry> {
        self.entries
            .get(&version)
            .ok_or(KeysError::KeyNotFound { version })
    }

    /// The entry for the current version. Always present by construction.
    pub fn current_entry(&self) -> &SecretEntry {
        &self.entries[&self.current_version]
    }

    /// The version used for new encryptions.
    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    /// All entries, in version order.
    pub fn entries(&self) -> impl Iterator<Item = &SecretEntry> {
        self.entries.values()
    }

    /// Entries reserved for custom cipher strategies.
    pub fn custom_entries(&self) -> impl Iterator<Item = &SecretEntry> {
        self.entries
            .values()
            .filter(|entry| entry.is_for_custom_encryption())
    }

    /// Whether any entry is reserved for custom cipher strategies.
    pub fn has_custom_entries(&self) -> bool {
        self.custom_entries().next().is_some()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretsDocument {
    current_version: u32,
    #[serde(default)]
    secrets: Vec<SecretDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretDocument {
    secret: String,
    version: u32,
    #[serde(default)]
    is_key: bool,
    #[serde(default)]
    is_for_custom_encryption: bool,
}
