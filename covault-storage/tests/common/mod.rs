//! In-memory transport double recording every call.
#![allow(dead_code)]

use covault_storage::{RecordTransport, StorageResult};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Write { country: String, wire: String },
    BatchWrite { country: String, wire: String },
    Read { country: String, hash: String },
    Delete { country: String, hash: String },
    Find { country: String, wire: String },
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<Call>>,
    read_response: Mutex<Option<String>>,
    find_response: Mutex<Option<String>>,
}

/// Clonable so a test can keep a handle after boxing it into the client.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Inner>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_read_response(&self, wire: impl Into<String>) {
        *self.inner.read_response.lock().unwrap() = Some(wire.into());
    }

    pub fn set_find_response(&self, wire: impl Into<String>) {
        *self.inner.find_response.lock().unwrap() = Some(wire.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

const EMPTY_PAGE: &str =
    r#"{"data":[],"meta":{"count":0,"limit":100,"offset":0,"total":0}}"#;

impl RecordTransport for FakeTransport {
    fn write(&self, country: &str, wire_record: &str) -> StorageResult<()> {
        self.record(Call::Write {
            country: country.to_string(),
            wire: wire_record.to_string(),
        });
        Ok(())
    }

    fn batch_write(&self, country: &str, wire_records: &str) -> StorageResult<()> {
        self.record(Call::BatchWrite {
            country: country.to_string(),
            wire: wire_records.to_string(),
        });
        Ok(())
    }

    fn read(&self, country: &str, record_key_hash: &str) -> StorageResult<Option<String>> {
        self.record(Call::Read {
            country: country.to_string(),
            hash: record_key_hash.to_string(),
        });
        Ok(self.inner.read_response.lock().unwrap().clone())
    }

    fn delete(&self, country: &str, record_key_hash: &str) -> StorageResult<()> {
        self.record(Call::Delete {
            country: country.to_string(),
            hash: record_key_hash.to_string(),
        });
        Ok(())
    }

    fn find(&self, country: &str, wire_filter: &str) -> StorageResult<String> {
        self.record(Call::Find {
            country: country.to_string(),
            wire: wire_filter.to_string(),
        });
        Ok(self
            .inner
            .find_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| EMPTY_PAGE.to_string()))
    }
}
