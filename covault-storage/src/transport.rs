//! The record transport boundary.

use crate::error::StorageResult;

/// Carries wire documents to and from the storage service.
///
/// The facade produces and consumes the wire strings; implementations own
/// connections, routing, auth, and retries. Record keys cross this boundary
/// already hashed, so an implementation never sees plaintext.
pub trait RecordTransport: Send + Sync {
    /// Stores one wire record.
    fn write(&self, country: &str, wire_record: &str) -> StorageResult<()>;

    /// Stores a `{"records": [...]}` batch.
    fn batch_write(&self, country: &str, wire_records: &str) -> StorageResult<()>;

    /// Fetches the wire record stored under a hashed key, if any.
    fn read(&self, country: &str, record_key_hash: &str) -> StorageResult<Option<String>>;

    /// Deletes the record stored under a hashed key.
    fn delete(&self, country: &str, record_key_hash: &str) -> StorageResult<()>;

    /// Runs a find request, returning the raw response document.
    fn find(&self, country: &str, wire_filter: &str) -> StorageResult<String>;
}
