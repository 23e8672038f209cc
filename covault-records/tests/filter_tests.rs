use covault_crypto::CryptoManager;
use covault_keys::{Keyring, SecretEntry, StaticKeyring};
use covault_records::{FindFilterBuilder, MAX_LIMIT, RangeField, RecordsError, StringField};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn crypto() -> CryptoManager {
    CryptoManager::new(
        Some(Arc::new(StaticKeyring::new(
            Keyring::new(vec![SecretEntry::new("filter password", 1)], 1).unwrap(),
        ))),
        "env-filter",
        vec![],
        false,
    )
    .unwrap()
}

fn parse(wire: &str) -> serde_json::Value {
    serde_json::from_str(wire).unwrap()
}

#[test]
fn empty_filter_defaults_to_full_page() {
    let wire = parse(&FindFilterBuilder::new().build().to_wire(&crypto()));
    assert_eq!(wire["filter"], json!({}));
    assert_eq!(wire["options"], json!({ "limit": MAX_LIMIT, "offset": 0 }));
}

#[test]
fn string_conditions_are_hashed() {
    let crypto = crypto();
    let filter = FindFilterBuilder::new()
        .key_eq(StringField::Key1, ["alpha", "beta"])
        .unwrap()
        .build();
    let wire = parse(&filter.to_wire(&crypto));
    assert_eq!(
        wire["filter"]["key1"],
        json!([crypto.create_key_hash("alpha"), crypto.create_key_hash("beta")])
    );
}

#[test]
fn negated_conditions_wrap_in_not() {
    let crypto = crypto();
    let filter = FindFilterBuilder::new()
        .key_not_eq(StringField::ProfileKey, ["p1"])
        .unwrap()
        .build();
    let wire = parse(&filter.to_wire(&crypto));
    assert_eq!(
        wire["filter"]["profile_key"],
        json!({ "$not": [crypto.create_key_hash("p1")] })
    );
}

#[test]
fn version_conditions_are_integer_arrays_never_hashed() {
    let crypto = crypto();
    let wire = parse(
        &FindFilterBuilder::new()
            .version_not_eq(vec![1])
            .build()
            .to_wire(&crypto),
    );
    assert_eq!(wire["filter"]["version"], json!({ "$not": [1] }));

    let wire = parse(
        &FindFilterBuilder::new()
            .version_eq(vec![0, 2])
            .build()
            .to_wire(&crypto),
    );
    assert_eq!(wire["filter"]["version"], json!([0, 2]));
}

#[test]
fn range_operators_serialize_as_documents() {
    let crypto = crypto();
    let filter = FindFilterBuilder::new()
        .range_gt(RangeField::RangeKey1, 10)
        .range_lte(RangeField::RangeKey2, 99)
        .range_eq(RangeField::RangeKey3, vec![1, 2, 3])
        .unwrap()
        .range_between(RangeField::RangeKey4, 5, 7)
        .unwrap()
        .range_between_bounds(RangeField::RangeKey5, 5, false, 7, false)
        .unwrap()
        .build();
    let wire = parse(&filter.to_wire(&crypto));

    assert_eq!(wire["filter"]["range_key1"], json!({ "$gt": 10 }));
    assert_eq!(wire["filter"]["range_key2"], json!({ "$lte": 99 }));
    assert_eq!(wire["filter"]["range_key3"], json!([1, 2, 3]));
    assert_eq!(wire["filter"]["range_key4"], json!({ "$gte": 5, "$lte": 7 }));
    assert_eq!(wire["filter"]["range_key5"], json!({ "$gt": 5, "$lt": 7 }));
}

#[test]
fn inverted_range_is_rejected() {
    let result = FindFilterBuilder::new().range_between(RangeField::RangeKey1, 7, 5);
    assert!(matches!(result, Err(RecordsError::InvalidFilter(_))));
}

#[test]
fn search_keys_serializes_hashed() {
    let crypto = crypto();
    let filter = FindFilterBuilder::new()
        .search_keys_like("needle")
        .unwrap()
        .build();
    let wire = parse(&filter.to_wire(&crypto));
    assert_eq!(
        wire["filter"]["search_keys"],
        json!([crypto.create_key_hash("needle")])
    );
}

#[test]
fn search_keys_conflicts_with_numbered_keys() {
    let result = FindFilterBuilder::new()
        .key_eq(StringField::Key3, ["v"])
        .unwrap()
        .search_keys_like("needle");
    assert!(matches!(result, Err(RecordsError::InvalidFilter(_))));

    let result = FindFilterBuilder::new()
        .search_keys_like("needle")
        .unwrap()
        .key_eq(StringField::Key3, ["v"]);
    assert!(matches!(result, Err(RecordsError::InvalidFilter(_))));
}

#[test]
fn search_keys_coexists_with_non_numbered_fields() {
    let filter = FindFilterBuilder::new()
        .search_keys_like("needle")
        .unwrap()
        .key_eq(StringField::ProfileKey, ["p"])
        .unwrap()
        .build();
    let wire = parse(&filter.to_wire(&crypto()));
    assert!(wire["filter"]["search_keys"].is_array());
    assert!(wire["filter"]["profile_key"].is_array());
}

#[test]
fn search_keys_length_bounds() {
    assert!(FindFilterBuilder::new().search_keys_like("ab").is_err());
    assert!(FindFilterBuilder::new().search_keys_like("abc").is_ok());
    assert!(FindFilterBuilder::new().search_keys_like("x".repeat(200)).is_ok());
    assert!(FindFilterBuilder::new().search_keys_like("x".repeat(201)).is_err());
}

#[test]
fn search_keys_rejected_through_key_eq() {
    let result = FindFilterBuilder::new().key_eq(StringField::SearchKeys, ["v"]);
    assert!(matches!(result, Err(RecordsError::InvalidFilter(_))));
}

#[test]
fn limit_bounds_are_enforced() {
    assert!(FindFilterBuilder::new().limit_and_offset(0, 0).is_err());
    assert!(FindFilterBuilder::new().limit_and_offset(MAX_LIMIT + 1, 0).is_err());

    let filter = FindFilterBuilder::new()
        .limit_and_offset(10, 30)
        .unwrap()
        .build();
    assert_eq!(filter.limit(), 10);
    assert_eq!(filter.offset(), 30);
}

#[test]
fn empty_value_list_is_rejected() {
    let result = FindFilterBuilder::new().key_eq(StringField::Key1, Vec::<String>::new());
    assert!(matches!(result, Err(RecordsError::InvalidFilter(_))));
}

#[test]
fn first_page_of_one_resets_paging_only() {
    let crypto = crypto();
    let filter = FindFilterBuilder::new()
        .key_eq(StringField::Key1, ["v"])
        .unwrap()
        .limit_and_offset(50, 20)
        .unwrap()
        .build()
        .first_page_of_one();
    let wire = parse(&filter.to_wire(&crypto));
    assert_eq!(wire["options"], json!({ "limit": 1, "offset": 0 }));
    assert!(wire["filter"]["key1"].is_array());
}
