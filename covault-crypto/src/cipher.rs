//! AES-256-GCM over the packed `salt || iv || ciphertext+tag` layout.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{SALT_SIZE, key_for_entry};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use covault_keys::SecretEntry;
use rand::RngCore;

/// Size of the GCM nonce in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Encrypts plaintext under an entry, returning the packed envelope payload.
///
/// A fresh random salt and IV are drawn from the OS RNG per call, so the same
/// plaintext never produces the same payload twice.
pub fn encrypt_packed(entry: &SecretEntry, plaintext: &str) -> CryptoResult<Vec<u8>> {
    let mut salt = [0u8; SALT_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let key = key_for_entry(entry, &salt)?;
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut packed = Vec::with_capacity(SALT_SIZE + IV_SIZE + ciphertext.len());
    packed.extend_from_slice(&salt);
    packed.extend_from_slice(&iv);
    packed.extend_from_slice(&ciphertext);
    Ok(packed)
}

/// Decrypts a packed payload produced by [`encrypt_packed`] (base64 "2" and
/// hex "1" envelopes share this layout).
pub fn decrypt_packed(entry: &SecretEntry, packed: &[u8]) -> CryptoResult<String> {
    if packed.len() < SALT_SIZE + IV_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption("ciphertext too short".into()));
    }
    let (salt, rest) = packed.split_at(SALT_SIZE);
    let (iv, ciphertext) = rest.split_at(IV_SIZE);

    let key = key_for_entry(entry, salt)?;
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CryptoError::Decryption("wrong key or tampered data".into()))?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {e}")))
}
