//! The caller-facing record shape.

use chrono::{DateTime, Utc};

/// A key-value record as the caller sees it: plaintext everywhere.
///
/// `record_key` is the only required field. `key1..key10`, `profile_key`,
/// and the service keys are equality-searchable strings (hashed on the wire);
/// `range_key1..range_key10` support numeric comparisons and are sent as-is.
/// Timestamps are server-assigned and only ever populated on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub record_key: String,
    pub body: Option<String>,
    pub precommit_body: Option<String>,
    pub profile_key: Option<String>,
    pub service_key1: Option<String>,
    pub service_key2: Option<String>,
    pub key1: Option<String>,
    pub key2: Option<String>,
    pub key3: Option<String>,
    pub key4: Option<String>,
    pub key5: Option<String>,
    pub key6: Option<String>,
    pub key7: Option<String>,
    pub key8: Option<String>,
    pub key9: Option<String>,
    pub key10: Option<String>,
    pub range_key1: Option<i64>,
    pub range_key2: Option<i64>,
    pub range_key3: Option<i64>,
    pub range_key4: Option<i64>,
    pub range_key5: Option<i64>,
    pub range_key6: Option<i64>,
    pub range_key7: Option<i64>,
    pub range_key8: Option<i64>,
    pub range_key9: Option<i64>,
    pub range_key10: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// A record with a key and body; everything else via struct update syntax.
    pub fn new(record_key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            record_key: record_key.into(),
            body: Some(body.into()),
            ..Self::default()
        }
    }
}
