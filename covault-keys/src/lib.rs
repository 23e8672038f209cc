//! Versioned secrets for the covault client.
//!
//! A [`Keyring`] is an immutable set of [`SecretEntry`] values, each carrying a
//! unique integer version, plus a designated current version used for new
//! encryptions. Older versions stay resolvable so records written under them
//! can still be decrypted.
//!
//! The keyring is supplied by a [`KeyringAccessor`], which callers may back
//! with anything from a constant to a secrets-manager lookup. The crypto layer
//! re-invokes the accessor on every operation, so rotated secrets take effect
//! without rebuilding the client.

mod accessor;
mod entry;
mod error;
mod keyring;

pub use accessor::{KeyringAccessor, StaticKeyring};
pub use entry::SecretEntry;
pub use error::{KeysError, KeysResult};
pub use keyring::Keyring;
