use covault_crypto::{IV_SIZE, SALT_SIZE, TAG_SIZE, decrypt_packed, encrypt_packed};
use covault_keys::SecretEntry;

fn password_entry() -> SecretEntry {
    SecretEntry::new("correct horse battery staple", 0)
}

#[test]
fn roundtrip_with_derived_key() {
    let entry = password_entry();
    let packed = encrypt_packed(&entry, "Hello, World!").unwrap();
    assert_eq!(decrypt_packed(&entry, &packed).unwrap(), "Hello, World!");
}

#[test]
fn roundtrip_with_pre_encoded_key() {
    let entry = SecretEntry::pre_encoded(*b"12345678901234567890123456789012", 3);
    let packed = encrypt_packed(&entry, "payload").unwrap();
    assert_eq!(decrypt_packed(&entry, &packed).unwrap(), "payload");
}

#[test]
fn pre_encoded_key_must_be_32_bytes() {
    let entry = SecretEntry::pre_encoded(b"short".to_vec(), 0);
    assert!(encrypt_packed(&entry, "payload").is_err());
}

#[test]
fn packed_layout_is_salt_iv_ciphertext_tag() {
    let entry = password_entry();
    let plaintext = "exactly this";
    let packed = encrypt_packed(&entry, plaintext).unwrap();
    assert_eq!(packed.len(), SALT_SIZE + IV_SIZE + plaintext.len() + TAG_SIZE);
}

#[test]
fn same_plaintext_produces_different_payloads() {
    let entry = password_entry();
    let first = encrypt_packed(&entry, "same").unwrap();
    let second = encrypt_packed(&entry, "same").unwrap();
    assert_ne!(first, second);
}

#[test]
fn wrong_secret_fails() {
    let packed = encrypt_packed(&password_entry(), "secret").unwrap();
    let wrong = SecretEntry::new("another password", 0);
    assert!(decrypt_packed(&wrong, &packed).is_err());
}

#[test]
fn tampered_ciphertext_fails() {
    let entry = password_entry();
    let mut packed = encrypt_packed(&entry, "secret").unwrap();
    let last = packed.len() - 1;
    packed[last] ^= 0xFF;
    assert!(decrypt_packed(&entry, &packed).is_err());
}

#[test]
fn truncated_payload_fails() {
    let entry = password_entry();
    let packed = encrypt_packed(&entry, "secret").unwrap();
    assert!(decrypt_packed(&entry, &packed[..SALT_SIZE + IV_SIZE]).is_err());
    assert!(decrypt_packed(&entry, &[]).is_err());
}

#[test]
fn empty_plaintext_roundtrips() {
    let entry = password_entry();
    let packed = encrypt_packed(&entry, "").unwrap();
    assert_eq!(decrypt_packed(&entry, &packed).unwrap(), "");
}
