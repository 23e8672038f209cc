//! The caller-facing storage facade.

use crate::error::{StorageError, StorageResult};
use crate::transport::RecordTransport;
use covault_crypto::{CipherStrategy, CryptoManager};
use covault_keys::KeyringAccessor;
use covault_records::{
    FindFilter, FindResult, Record, batch_from_wire, record_from_wire, record_to_wire,
    records_to_wire,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for a [`Storage`] client.
///
/// Without a keyring accessor the client runs in plaintext passthrough mode:
/// record keys are still hashed (the keyed hash needs only the environment
/// id) but bodies travel base64-encoded, not encrypted.
pub struct StorageOptions {
    pub environment_id: String,
    pub keyring_accessor: Option<Arc<dyn KeyringAccessor>>,
    pub custom_strategies: Vec<Arc<dyn CipherStrategy>>,
    pub normalize_keys: bool,
}

impl StorageOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            keyring_accessor: None,
            custom_strategies: Vec::new(),
            normalize_keys: false,
        }
    }

    pub fn with_keyring_accessor(mut self, accessor: Arc<dyn KeyringAccessor>) -> Self {
        self.keyring_accessor = Some(accessor);
        self
    }

    pub fn with_custom_strategy(mut self, strategy: Arc<dyn CipherStrategy>) -> Self {
        self.custom_strategies.push(strategy);
        self
    }

    pub fn with_normalize_keys(mut self, normalize: bool) -> Self {
        self.normalize_keys = normalize;
        self
    }
}

/// Encrypted, searchable record storage against a remote service.
///
/// All crypto happens on this side of the [`RecordTransport`] boundary; the
/// transport only ever sees hashed keys and enveloped bodies.
pub struct Storage {
    crypto: CryptoManager,
    transport: Box<dyn RecordTransport>,
}

impl Storage {
    /// Builds a client, failing fast on configuration errors.
    pub fn new(options: StorageOptions, transport: Box<dyn RecordTransport>) -> StorageResult<Self> {
        if options.environment_id.is_empty() {
            return Err(StorageError::Client("environment id can't be empty".into()));
        }
        if options.keyring_accessor.is_none() && !options.custom_strategies.is_empty() {
            return Err(StorageError::Client(
                "custom encryption can be used only with a keyring accessor".into(),
            ));
        }
        let crypto = CryptoManager::new(
            options.keyring_accessor,
            options.environment_id,
            options.custom_strategies,
            options.normalize_keys,
        )?;
        debug!(encrypted = crypto.is_encrypted(), "storage client initialized");
        Ok(Self {
            crypto,
            transport,
        })
    }

    /// Whether writes are encrypted (a keyring accessor is configured).
    pub fn is_encrypted(&self) -> bool {
        self.crypto.is_encrypted()
    }

    pub(crate) fn crypto(&self) -> &CryptoManager {
        &self.crypto
    }

    /// Encrypts and stores one record.
    pub fn write(&self, country: &str, record: &Record) -> StorageResult<()> {
        check_country(country)?;
        check_record_key(&record.record_key)?;
        let wire = record_to_wire(record, &self.crypto)?;
        self.transport.write(country, &wire)?;
        debug!(country, "record written");
        Ok(())
    }

    /// Encrypts and stores records in one request. The batch must be
    /// non-empty and every record is validated before anything is sent.
    pub fn batch_write(&self, country: &str, records: &[Record]) -> StorageResult<()> {
        check_country(country)?;
        if records.is_empty() {
            return Err(StorageError::Client("can't write empty batch".into()));
        }
        for record in records {
            check_record_key(&record.record_key)?;
        }
        let wire = records_to_wire(records, &self.crypto)?;
        self.transport.batch_write(country, &wire)?;
        debug!(country, count = records.len(), "batch written");
        Ok(())
    }

    /// Reads and decrypts the record stored under `record_key`.
    pub fn read(&self, country: &str, record_key: &str) -> StorageResult<Option<Record>> {
        check_country(country)?;
        check_record_key(record_key)?;
        let hash = self.crypto.create_key_hash(record_key);
        match self.transport.read(country, &hash)? {
            Some(wire) => Ok(Some(record_from_wire(&wire, &self.crypto)?)),
            None => Ok(None),
        }
    }

    /// Deletes the record stored under `record_key`.
    pub fn delete(&self, country: &str, record_key: &str) -> StorageResult<()> {
        check_country(country)?;
        check_record_key(record_key)?;
        let hash = self.crypto.create_key_hash(record_key);
        self.transport.delete(country, &hash)?;
        debug!(country, "record deleted");
        Ok(())
    }

    /// Runs a find request, decrypting each returned record independently.
    pub fn find(&self, country: &str, filter: &FindFilter) -> StorageResult<FindResult> {
        check_country(country)?;
        let wire = filter.to_wire(&self.crypto);
        let response = self.transport.find(country, &wire)?;
        let result = batch_from_wire(&response, &self.crypto)?;
        if !result.errors.is_empty() {
            warn!(
                country,
                errors = result.errors.len(),
                "some records in the find page failed to decode"
            );
        }
        Ok(result)
    }

    /// Finds the first matching record, if any.
    pub fn find_one(&self, country: &str, filter: FindFilter) -> StorageResult<Option<Record>> {
        let result = self.find(country, &filter.first_page_of_one())?;
        Ok(result.records.into_iter().next())
    }
}

fn check_country(country: &str) -> StorageResult<()> {
    if country.is_empty() {
        return Err(StorageError::Client("country can't be empty".into()));
    }
    Ok(())
}

fn check_record_key(record_key: &str) -> StorageResult<()> {
    if record_key.is_empty() {
        return Err(StorageError::Client("record key can't be empty".into()));
    }
    Ok(())
}
