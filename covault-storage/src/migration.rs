//! Key-rotation migration.
//!
//! One page per call: find records encrypted under non-current key versions,
//! rewrite them through the ordinary batch-write path so they pick up the
//! current version as a side effect, and report how many are left. The caller
//! drives the loop, calling again until `total_left` reaches zero.

use crate::error::{StorageError, StorageResult};
use crate::storage::Storage;
use covault_records::{FindFilterBuilder, MAX_LIMIT, RecordError};
use tracing::debug;

/// Outcome of one migration page.
#[derive(Debug)]
pub struct MigrateResult {
    /// Records re-encrypted under the current key version by this call.
    pub migrated: usize,
    /// Server-reported matches still on old versions after this call.
    pub total_left: u64,
    /// Records in the page that could not be decoded and were left as-is.
    pub errors: Vec<RecordError>,
}

impl Storage {
    /// Re-encrypts one page of up to `limit` records stored under non-current
    /// key versions.
    ///
    /// Fails before any request when encryption is off (nothing to rotate) or
    /// `limit` is out of range. Records that fail to decode are skipped and
    /// surfaced in the result; they count toward `total_left`.
    pub fn migrate(&self, country: &str, limit: u64) -> StorageResult<MigrateResult> {
        if !self.is_encrypted() {
            return Err(StorageError::Client(
                "migration is not supported when encryption is off".into(),
            ));
        }
        if limit < 1 {
            return Err(StorageError::Client("limit can't be < 1".into()));
        }
        if limit > MAX_LIMIT {
            return Err(StorageError::Client(format!(
                "limit can't exceed {MAX_LIMIT}"
            )));
        }
        let current = self.crypto().current_secret_version()?;
        let filter = FindFilterBuilder::new()
            .limit_and_offset(limit, 0)?
            .version_not_eq(vec![current])
            .build();

        let page = self.find(country, &filter)?;
        let migrated = page.records.len();
        if migrated > 0 {
            self.batch_write(country, &page.records)?;
        }
        let total_left = page.total.saturating_sub(migrated as u64);
        debug!(country, migrated, total_left, "migration page done");
        Ok(MigrateResult {
            migrated,
            total_left,
            errors: page.errors,
        })
    }
}
