//! Pluggable cipher strategies.
//!
//! Callers can register their own encryption scheme alongside the built-ins.
//! Each strategy owns a version tag that prefixes its envelopes; the manager
//! dispatches decryption to whichever strategy claims the tag. Strategies
//! never see the keyring — the manager hands them the resolved entry.

use crate::error::CryptoResult;
use covault_keys::SecretEntry;

/// An externally supplied encryption scheme.
///
/// Implementations receive the secret entry resolved for the operation and
/// produce/consume the envelope payload (the part after the `tag:` prefix).
/// They must be deterministic about format: `decrypt(encrypt(p)) == p` for the
/// same entry. The manager verifies this with a round-trip probe at
/// construction time.
pub trait CipherStrategy: Send + Sync {
    /// The version tag identifying this strategy's envelopes.
    ///
    /// Must be non-empty and distinct from the built-in tags `"1"`, `"2"`,
    /// and `"pt"`, and from every other registered strategy.
    fn version(&self) -> &str;

    /// Whether this strategy should be used for new encryptions.
    ///
    /// At most one strategy in a configuration may return true.
    fn is_current(&self) -> bool {
        false
    }

    /// Encrypts plaintext, returning the envelope payload.
    fn encrypt(&self, plaintext: &str, secret: &SecretEntry) -> CryptoResult<String>;

    /// Decrypts an envelope payload produced by this strategy.
    fn decrypt(&self, payload: &str, secret: &SecretEntry) -> CryptoResult<String>;
}
