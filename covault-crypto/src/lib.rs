//! Envelope encryption and key versioning for the covault client.
//!
//! Every encrypted value travels as a versioned envelope `"<tag>:<payload>"`.
//! The tag selects the cipher scheme:
//!
//! - `"2"` — current built-in scheme: AES-256-GCM over a PBKDF2-derived (or
//!   pre-encoded) key, payload is base64 of `salt(64) || iv(12) || ct+tag`.
//! - `"1"` — legacy scheme: same packed bytes, hex-encoded. Read-only.
//! - `"pt"` — base64 passthrough, used only when no keyring is configured.
//! - anything else — an externally supplied [`CipherStrategy`] registered under
//!   that tag.
//!
//! [`CryptoManager`] owns strategy dispatch, construction-time validation of
//! the strategy/keyring configuration, and the deterministic keyed hash used
//! for equality-searchable fields.

mod cipher;
mod envelope;
mod error;
mod key;
mod manager;
mod strategy;

pub use cipher::{IV_SIZE, TAG_SIZE, decrypt_packed, encrypt_packed};
pub use envelope::{TAG_CURRENT, TAG_LEGACY, TAG_PLAINTEXT};
pub use error::{CryptoError, CryptoResult};
pub use key::{DerivedKey, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE, derive_key, key_for_entry};
pub use manager::CryptoManager;
pub use strategy::CipherStrategy;
