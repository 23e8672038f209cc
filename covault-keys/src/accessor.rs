//! Keyring supply abstraction.
//!
//! The crypto layer never holds a keyring directly; it asks an accessor for a
//! fresh one per operation, so callers can rotate secrets behind it at any
//! time. Caching and refresh policy are entirely the accessor's concern.

use crate::error::KeysResult;
use crate::keyring::Keyring;

/// Supplies the keyring for crypto operations.
///
/// Implementations must tolerate being called once per operation.
pub trait KeyringAccessor: Send + Sync {
    /// Returns the keyring to use for the current operation.
    fn keyring(&self) -> KeysResult<Keyring>;
}

impl<F> KeyringAccessor for F
where
    F: Fn() -> KeysResult<Keyring> + Send + Sync,
{
    fn keyring(&self) -> KeysResult<Keyring> {
        self()
    }
}

/// Accessor that always hands out a clone of a fixed keyring.
pub struct StaticKeyring(Keyring);

impl StaticKeyring {
    /// Wraps a keyring that never changes for the client's lifetime.
    pub fn new(keyring: Keyring) -> Self {
        Self(keyring)
    }
}

impl KeyringAccessor for StaticKeyring {
    fn keyring(&self) -> KeysResult<Keyring> {
        Ok(self.0.clone())
    }
}
