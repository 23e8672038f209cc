//! Client facade for encrypted, searchable record storage.
//!
//! [`Storage`] ties the crypto and codec layers to a [`RecordTransport`]
//! implementation: it encrypts and hashes on the way out, decrypts and
//! validates on the way in, and never hands the transport any plaintext.
//! [`Storage::migrate`] rewrites records under the current key version one
//! page at a time.

mod error;
mod migration;
mod storage;
mod transport;

pub use error::{StorageError, StorageResult};
pub use migration::MigrateResult;
pub use storage::{Storage, StorageOptions};
pub use transport::RecordTransport;
