//! Record domain type and wire codec for the covault client.
//!
//! A [`Record`] is the caller-facing shape. On the wire it becomes a
//! transfer record: equality-searchable fields carry keyed hashes instead of
//! plaintext, and everything needed to restore the original record travels
//! inside the encrypted body as `{"payload": <body>, "meta": {...}}`.
//!
//! [`FindFilter`] builds the search request document, hashing string
//! conditions with the same keyed hash so server-side equality matching works
//! without the server ever seeing plaintext.

mod batch;
mod error;
mod filter;
mod record;
mod transfer;

pub use batch::{BatchMeta, FindResult, RecordError, batch_from_wire};
pub use error::{RecordsError, RecordsResult};
pub use filter::{
    FindFilter, FindFilterBuilder, MAX_LIMIT, RangeField, StringField,
};
pub use record::Record;
pub use transfer::{TransferRecord, record_from_wire, record_to_wire, records_to_wire};
