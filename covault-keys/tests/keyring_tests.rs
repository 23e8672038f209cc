use covault_keys::{Keyring, KeysError, SecretEntry, StaticKeyring, KeyringAccessor};
use pretty_assertions::assert_eq;

#[test]
fn resolves_entries_by_version() {
    let keyring = Keyring::new(
        vec![
            SecretEntry::new("old-password", 1),
            SecretEntry::new("new-password", 5),
        ],
        5,
    )
    .unwrap();

    assert_eq!(keyring.current_version(), 5);
    assert_eq!(keyring.current_entry().material(), b"new-password");
    assert_eq!(keyring.entry(1).unwrap().material(), b"old-password");
}

#[test]
fn versions_need_not_be_contiguous() {
    let keyring = Keyring::new(
        vec![SecretEntry::new("a", 2), SecretEntry::new("b", 9)],
        9,
    )
    .unwrap();
    assert!(keyring.entry(2).is_ok());
    assert!(keyring.entry(9).is_ok());
}

#[test]
fn missing_version_is_key_not_found() {
    let keyring = Keyring::new(vec![SecretEntry::new("pw", 0)], 0).unwrap();
    match keyring.entry(3) {
        Err(KeysError::KeyNotFound { version: 3 }) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn duplicate_versions_rejected() {
    let result = Keyring::new(
        vec![SecretEntry::new("a", 1), SecretEntry::new("b", 1)],
        1,
    );
    assert!(matches!(result, Err(KeysError::DuplicateVersion(1))));
}

#[test]
fn current_version_must_exist() {
    let result = Keyring::new(vec![SecretEntry::new("a", 1)], 2);
    assert!(matches!(result, Err(KeysError::CurrentVersionMissing(2))));
}

#[test]
fn empty_keyring_rejected() {
    assert!(Keyring::new(vec![], 0).is_err());
}

#[test]
fn password_bootstrap_uses_version_zero() {
    let keyring = Keyring::from_password("password");
    assert_eq!(keyring.current_version(), 0);
    assert_eq!(keyring.current_entry().material(), b"password");
    assert!(!keyring.current_entry().is_pre_encoded_key());
}

#[test]
fn parses_secrets_data_json() {
    let json = r#"{
        "currentVersion": 2,
        "secrets": [
            {"secret": "password0", "version": 0},
            {"secret": "12345678901234567890123456789012", "version": 1, "isKey": true},
            {"secret": "customSecret", "version": 2, "isForCustomEncryption": true}
        ]
    }"#;
    let keyring = Keyring::from_json(json).unwrap();

    assert_eq!(keyring.current_version(), 2);
    assert!(!keyring.entry(0).unwrap().is_pre_encoded_key());
    assert!(keyring.entry(1).unwrap().is_pre_encoded_key());
    assert!(keyring.entry(2).unwrap().is_for_custom_encryption());
    assert!(keyring.has_custom_entries());
    assert_eq!(keyring.custom_entries().count(), 1);
}

#[test]
fn malformed_secrets_data_rejected() {
    assert!(matches!(
        Keyring::from_json("{not json"),
        Err(KeysError::InvalidSecretsData(_))
    ));
    // structurally valid JSON but current version not among secrets
    let json = r#"{"currentVersion": 1, "secrets": [{"secret": "a", "version": 0}]}"#;
    assert!(matches!(
        Keyring::from_json(json),
        Err(KeysError::CurrentVersionMissing(1))
    ));
}

#[test]
fn debug_output_redacts_material() {
    let entry = SecretEntry::new("super-secret-password", 0);
    let debug = format!("{entry:?}");
    assert!(!debug.contains("super-secret-password"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn static_accessor_hands_out_clones() {
    let accessor = StaticKeyring::new(Keyring::from_password("pw"));
    let first = accessor.keyring().unwrap();
    let second = accessor.keyring().unwrap();
    assert_eq!(first.current_version(), second.current_version());
}

#[test]
fn closures_work_as_accessors() {
    let accessor = || -> covault_keys::KeysResult<Keyring> { Ok(Keyring::from_password("pw")) };
    assert_eq!(accessor.keyring().unwrap().current_version(), 0);
}
