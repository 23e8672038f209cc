//! Wire-level record projection.
//!
//! Outbound, every equality-searchable field is replaced by its keyed hash
//! and the plaintext originals are packed, together with the body, into a
//! single JSON document `{"payload": <body>, "meta": {...}}` that is
//! encrypted as the wire `body`. The `payload`/`meta` key names are part of
//! the deployed wire format and must not change.
//!
//! Inbound, the process reverses: decrypt the body under the record's
//! declared key version, unpack meta if present, or treat the decrypted
//! string as the body verbatim for records written before meta packing
//! existed.

use crate::error::{RecordsError, RecordsResult};
use crate::record::Record;
use chrono::{DateTime, Utc};
use covault_crypto::CryptoManager;
use serde::{Deserialize, Serialize};

/// A record as it travels to and from the storage service.
///
/// Field names serialize exactly as the server expects them (snake_case).
/// `version` records which key version encrypted the body; absent means 0,
/// the pre-versioning default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precommit_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key7: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key8: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key9: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key10: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key1: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key2: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key3: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key4: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key5: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key6: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key7: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key8: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key9: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key10: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The document encrypted as the wire `body`.
#[derive(Debug, Serialize, Deserialize)]
struct BodyEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<RecordMeta>,
}

/// Plaintext originals of the hashed fields, packed inside the encrypted body.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    record_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_key1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_key2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key7: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key8: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key9: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key10: Option<String>,
}

impl TransferRecord {
    /// Projects a record onto the wire: hashes searchable fields, packs the
    /// plaintext originals and the body into the encrypted body envelope, and
    /// encrypts `precommit_body` separately under the same key version.
    pub fn encrypt(record: &Record, crypto: &CryptoManager) -> RecordsResult<Self> {
        let hash = |value: &Option<String>| value.as_deref().map(|v| crypto.create_key_hash(v));

        let meta = RecordMeta {
            record_key: Some(record.record_key.clone()),
            profile_key: record.profile_key.clone(),
            service_key1: record.service_key1.clone(),
            service_key2: record.service_key2.clone(),
            key1: record.key1.clone(),
            key2: record.key2.clone(),
            key3: record.key3.clone(),
            key4: record.key4.clone(),
            key5: record.key5.clone(),
            key6: record.key6.clone(),
            key7: record.key7.clone(),
            key8: record.key8.clone(),
            key9: record.key9.clone(),
            key10: record.key10.clone(),
        };
        let envelope = BodyEnvelope {
            payload: record.body.clone(),
            meta: Some(meta),
        };
        let body_json = serde_json::to_string(&envelope)?;
        let (body, version) = crypto.encrypt(&body_json)?;

        let precommit_body = match &record.precommit_body {
            Some(precommit) => Some(crypto.encrypt(precommit)?.0),
            None => None,
        };

        Ok(Self {
            record_key: Some(crypto.create_key_hash(&record.record_key)),
            body: Some(body),
            precommit_body,
            profile_key: hash(&record.profile_key),
            service_key1: hash(&record.service_key1),
            service_key2: hash(&record.service_key2),
            key1: hash(&record.key1),
            key2: hash(&record.key2),
            key3: hash(&record.key3),
            key4: hash(&record.key4),
            key5: hash(&record.key5),
            key6: hash(&record.key6),
            key7: hash(&record.key7),
            key8: hash(&record.key8),
            key9: hash(&record.key9),
            key10: hash(&record.key10),
            range_key1: record.range_key1,
            range_key2: record.range_key2,
            range_key3: record.range_key3,
            range_key4: record.range_key4,
            range_key5: record.range_key5,
            range_key6: record.range_key6,
            range_key7: record.range_key7,
            range_key8: record.range_key8,
            range_key9: record.range_key9,
            range_key10: record.range_key10,
            version,
            is_encrypted: crypto.is_encrypted(),
            created_at: None,
            updated_at: None,
        })
    }

    /// Checks required fields, listing every missing one in a single error.
    pub fn validate(&self) -> RecordsResult<()> {
        let mut missing = Vec::new();
        if self.record_key.as_deref().is_none_or(str::is_empty) {
            missing.push("record_key");
        }
        if self.body.as_deref().is_none_or(str::is_empty) {
            missing.push("body");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RecordsError::MissingFields(missing.join(", ")))
        }
    }

    /// Decrypts and unpacks this wire record into a domain record.
    ///
    /// A missing `version` means 0. A decrypted body that parses as JSON with
    /// a `meta` object is unpacked (the meta fields replace the hashed wire
    /// values and `payload` becomes the body); anything else is a record from
    /// before meta packing and the decrypted string is the body verbatim.
    pub fn into_record(self, crypto: &CryptoManager) -> RecordsResult<Record> {
        self.validate()?;
        let version = self.version.unwrap_or(0);

        // validate() guarantees presence
        let wire_body = self.body.as_deref().unwrap_or_default();
        let decrypted = crypto.decrypt(wire_body, version)?;

        let precommit_body = match self.precommit_body.as_deref() {
            Some(envelope) => Some(crypto.decrypt(envelope, version)?),
            None => None,
        };

        let mut record = Record {
            record_key: self.record_key.unwrap_or_default(),
            body: None,
            precommit_body,
            profile_key: self.profile_key,
            service_key1: self.service_key1,
            service_key2: self.service_key2,
            key1: self.key1,
            key2: self.key2,
            key3: self.key3,
            key4: self.key4,
            key5: self.key5,
            key6: self.key6,
            key7: self.key7,
            key8: self.key8,
            key9: self.key9,
            key10: self.key10,
            range_key1: self.range_key1,
            range_key2: self.range_key2,
            range_key3: self.range_key3,
            range_key4: self.range_key4,
            range_key5: self.range_key5,
            range_key6: self.range_key6,
            range_key7: self.range_key7,
            range_key8: self.range_key8,
            range_key9: self.range_key9,
            range_key10: self.range_key10,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        match serde_json::from_str::<BodyEnvelope>(&decrypted) {
            Ok(BodyEnvelope {
                payload,
                meta: Some(meta),
            }) => {
                record.body = payload;
                if let Some(record_key) = meta.record_key {
                    record.record_key = record_key;
                }
                record.profile_key = meta.profile_key;
                record.service_key1 = meta.service_key1;
                record.service_key2 = meta.service_key2;
                record.key1 = meta.key1;
                record.key2 = meta.key2;
                record.key3 = meta.key3;
                record.key4 = meta.key4;
                record.key5 = meta.key5;
                record.key6 = meta.key6;
                record.key7 = meta.key7;
                record.key8 = meta.key8;
                record.key9 = meta.key9;
                record.key10 = meta.key10;
            }
            // pre-meta-format record: the decrypted string is the body
            _ => record.body = Some(decrypted),
        }
        Ok(record)
    }
}

/// Serializes one record for a write request.
pub fn record_to_wire(record: &Record, crypto: &CryptoManager) -> RecordsResult<String> {
    Ok(serde_json::to_string(&TransferRecord::encrypt(record, crypto)?)?)
}

/// Serializes records for a batch write request: `{"records": [...]}`.
pub fn records_to_wire(records: &[Record], crypto: &CryptoManager) -> RecordsResult<String> {
    let wire: Vec<TransferRecord> = records
        .iter()
        .map(|record| TransferRecord::encrypt(record, crypto))
        .collect::<RecordsResult<_>>()?;
    Ok(serde_json::json!({ "records": wire }).to_string())
}

/// Parses and decrypts a single-record response.
pub fn record_from_wire(json: &str, crypto: &CryptoManager) -> RecordsResult<Record> {
    let wire: TransferRecord =
        serde_json::from_str(json).map_err(|e| RecordsError::Response(e.to_string()))?;
    wire.into_record(crypto)
}
