//! Find-response decoding with per-record error isolation.

use crate::error::{RecordsError, RecordsResult};
use crate::record::Record;
use crate::transfer::TransferRecord;
use covault_crypto::CryptoManager;
use serde::Deserialize;
use thiserror::Error;

/// Server-reported paging metadata from a find response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BatchMeta {
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
}

/// A record that failed to parse or decrypt inside a batch, kept alongside
/// its raw wire form so the caller can inspect or retry it.
#[derive(Debug, Error)]
#[error("record parse error: {message}")]
pub struct RecordError {
    pub message: String,
    pub raw_data: String,
    #[source]
    pub cause: RecordsError,
}

/// Decoded find response: successfully decrypted records plus per-record
/// failures. One bad record never discards the rest of the page.
#[derive(Debug, Default)]
pub struct FindResult {
    pub records: Vec<Record>,
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
    pub errors: Vec<RecordError>,
}

impl FindResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
struct TransferBatch {
    #[serde(default)]
    data: Vec<serde_json::Value>,
    meta: BatchMeta,
}

/// Parses a find response, decrypting each record independently.
///
/// A response that is not a `{"data": [...], "meta": {...}}` document is a
/// server error; a record inside `data` that fails validation or decryption
/// becomes a [`RecordError`] entry instead of aborting the page.
pub fn batch_from_wire(json: &str, crypto: &CryptoManager) -> RecordsResult<FindResult> {
    let batch: TransferBatch =
        serde_json::from_str(json).map_err(|e| RecordsError::Response(e.to_string()))?;

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for raw in batch.data {
        match decode_one(&raw, crypto) {
            Ok(record) => records.push(record),
            Err(cause) => errors.push(RecordError {
                message: cause.to_string(),
                raw_data: raw.to_string(),
                cause,
            }),
        }
    }

    Ok(FindResult {
        records,
        count: batch.meta.count,
        limit: batch.meta.limit,
        offset: batch.meta.offset,
        total: batch.meta.total,
        errors,
    })
}

fn decode_one(raw: &serde_json::Value, crypto: &CryptoManager) -> RecordsResult<Record> {
    let wire: TransferRecord = serde_json::from_value(raw.clone())
        .map_err(|e| RecordsError::Response(e.to_string()))?;
    wire.into_record(crypto)
}
