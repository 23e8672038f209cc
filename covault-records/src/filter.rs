//! Find-request construction.
//!
//! String conditions are hashed with the keyed hash at serialization time, so
//! the server matches on hashes without ever seeing plaintext. Version and
//! range conditions are numeric and travel as-is.

use crate::error::{RecordsError, RecordsResult};
use covault_crypto::CryptoManager;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Largest page the server accepts.
pub const MAX_LIMIT: u64 = 100;

const DEFAULT_OFFSET: u64 = 0;

/// Equality-searchable string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StringField {
    RecordKey,
    ProfileKey,
    ServiceKey1,
    ServiceKey2,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Key10,
    SearchKeys,
}

impl StringField {
    fn wire_name(self) -> &'static str {
        match self {
            Self::RecordKey => "record_key",
            Self::ProfileKey => "profile_key",
            Self::ServiceKey1 => "service_key1",
            Self::ServiceKey2 => "service_key2",
            Self::Key1 => "key1",
            Self::Key2 => "key2",
            Self::Key3 => "key3",
            Self::Key4 => "key4",
            Self::Key5 => "key5",
            Self::Key6 => "key6",
            Self::Key7 => "key7",
            Self::Key8 => "key8",
            Self::Key9 => "key9",
            Self::Key10 => "key10",
            Self::SearchKeys => "search_keys",
        }
    }

    fn is_numbered_key(self) -> bool {
        matches!(
            self,
            Self::Key1
                | Self::Key2
                | Self::Key3
                | Self::Key4
                | Self::Key5
                | Self::Key6
                | Self::Key7
                | Self::Key8
                | Self::Key9
                | Self::Key10
        )
    }
}

/// Numeric range fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RangeField {
    RangeKey1,
    RangeKey2,
    RangeKey3,
    RangeKey4,
    RangeKey5,
    RangeKey6,
    RangeKey7,
    RangeKey8,
    RangeKey9,
    RangeKey10,
}

impl RangeField {
    fn wire_name(self) -> &'static str {
        match self {
            Self::RangeKey1 => "range_key1",
            Self::RangeKey2 => "range_key2",
            Self::RangeKey3 => "range_key3",
            Self::RangeKey4 => "range_key4",
            Self::RangeKey5 => "range_key5",
            Self::RangeKey6 => "range_key6",
            Self::RangeKey7 => "range_key7",
            Self::RangeKey8 => "range_key8",
            Self::RangeKey9 => "range_key9",
            Self::RangeKey10 => "range_key10",
        }
    }
}

#[derive(Debug, Clone)]
struct StringCondition {
    values: Vec<String>,
    negated: bool,
}

#[derive(Debug, Clone)]
enum RangeCondition {
    In(Vec<i64>),
    Gt(i64),
    Gte(i64),
    Lt(i64),
    Lte(i64),
    Between {
        from: i64,
        from_inclusive: bool,
        to: i64,
        to_inclusive: bool,
    },
}

/// A validated find request. Built through [`FindFilterBuilder`].
#[derive(Debug, Clone)]
pub struct FindFilter {
    string_conditions: BTreeMap<StringField, StringCondition>,
    range_conditions: BTreeMap<RangeField, RangeCondition>,
    version_condition: Option<(Vec<u32>, bool)>,
    limit: u64,
    offset: u64,
}

impl Default for FindFilter {
    fn default() -> Self {
        Self {
            string_conditions: BTreeMap::new(),
            range_conditions: BTreeMap::new(),
            version_condition: None,
            limit: MAX_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl FindFilter {
    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Same conditions, first page of one. Used by `find_one`.
    pub fn first_page_of_one(mut self) -> Self {
        self.limit = 1;
        self.offset = 0;
        self
    }

    /// Serializes the request document:
    /// `{"filter": {...}, "options": {"limit": n, "offset": n}}`.
    ///
    /// String condition values are hashed here; version and range values are
    /// numeric and sent verbatim. Negated conditions wrap their array in
    /// `{"$not": [...]}`.
    pub fn to_wire(&self, crypto: &CryptoManager) -> String {
        let mut filter = serde_json::Map::new();

        for (field, condition) in &self.string_conditions {
            let hashes: Vec<Value> = condition
                .values
                .iter()
                .map(|value| Value::String(crypto.create_key_hash(value)))
                .collect();
            filter.insert(
                field.wire_name().to_string(),
                wrap_not(Value::Array(hashes), condition.negated),
            );
        }

        if let Some((versions, negated)) = &self.version_condition {
            let values: Vec<Value> = versions.iter().map(|v| json!(v)).collect();
            filter.insert("version".to_string(), wrap_not(Value::Array(values), *negated));
        }

        for (field, condition) in &self.range_conditions {
            let value = match condition {
                RangeCondition::In(values) => json!(values),
                RangeCondition::Gt(n) => json!({ "$gt": n }),
                RangeCondition::Gte(n) => json!({ "$gte": n }),
                RangeCondition::Lt(n) => json!({ "$lt": n }),
                RangeCondition::Lte(n) => json!({ "$lte": n }),
                RangeCondition::Between {
                    from,
                    from_inclusive,
                    to,
                    to_inclusive,
                } => {
                    let mut object = serde_json::Map::new();
                    object.insert(
                        if *from_inclusive { "$gte" } else { "$gt" }.to_string(),
                        json!(from),
                    );
                    object.insert(
                        if *to_inclusive { "$lte" } else { "$lt" }.to_string(),
                        json!(to),
                    );
                    Value::Object(object)
                }
            };
            filter.insert(field.wire_name().to_string(), value);
        }

        json!({
            "filter": filter,
            "options": { "limit": self.limit, "offset": self.offset },
        })
        .to_string()
    }
}

fn wrap_not(values: Value, negated: bool) -> Value {
    if negated {
        json!({ "$not": values })
    } else {
        values
    }
}

/// Fallible builder for [`FindFilter`]. Every constraint is checked at the
/// call site so an invalid filter never reaches the transport.
#[derive(Debug, Clone, Default)]
pub struct FindFilterBuilder {
    filter: FindFilter,
}

impl FindFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match records where `field` equals any of `values`.
    pub fn key_eq<I, S>(self, field: StringField, values: I) -> RecordsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_condition(field, values, false)
    }

    /// Match records where `field` equals none of `values`.
    pub fn key_not_eq<I, S>(self, field: StringField, values: I) -> RecordsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_condition(field, values, true)
    }

    fn string_condition<I, S>(
        mut self,
        field: StringField,
        values: I,
        negated: bool,
    ) -> RecordsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if field == StringField::SearchKeys {
            return Err(RecordsError::InvalidFilter(
                "search_keys can only be set via search_keys_like".into(),
            ));
        }
        if field.is_numbered_key()
            && self
                .filter
                .string_conditions
                .contains_key(&StringField::SearchKeys)
        {
            return Err(RecordsError::InvalidFilter(
                "search_keys can't be combined with key1..key10 conditions".into(),
            ));
        }
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(RecordsError::InvalidFilter(format!(
                "condition on {} needs at least one value",
                field.wire_name()
            )));
        }
        self.filter
            .string_conditions
            .insert(field, StringCondition { values, negated });
        Ok(self)
    }

    /// Substring match across `key1..key10`. Mutually exclusive with explicit
    /// conditions on those fields; the value must be 3 to 200 characters.
    pub fn search_keys_like(mut self, value: impl Into<String>) -> RecordsResult<Self> {
        if self
            .filter
            .string_conditions
            .keys()
            .any(|field| field.is_numbered_key())
        {
            return Err(RecordsError::InvalidFilter(
                "search_keys can't be combined with key1..key10 conditions".into(),
            ));
        }
        let value = value.into();
        if value.chars().count() < 3 || value.chars().count() > 200 {
            return Err(RecordsError::InvalidFilter(
                "search_keys value must be 3 to 200 characters".into(),
            ));
        }
        self.filter.string_conditions.insert(
            StringField::SearchKeys,
            StringCondition {
                values: vec![value],
                negated: false,
            },
        );
        Ok(self)
    }

    /// Match records encrypted under any of `versions`.
    pub fn version_eq(mut self, versions: Vec<u32>) -> Self {
        self.filter.version_condition = Some((versions, false));
        self
    }

    /// Match records encrypted under none of `versions`. Migration's filter.
    pub fn version_not_eq(mut self, versions: Vec<u32>) -> Self {
        self.filter.version_condition = Some((versions, true));
        self
    }

    pub fn range_eq(mut self, field: RangeField, values: Vec<i64>) -> RecordsResult<Self> {
        if values.is_empty() {
            return Err(RecordsError::InvalidFilter(format!(
                "condition on {} needs at least one value",
                field.wire_name()
            )));
        }
        self.filter
            .range_conditions
            .insert(field, RangeCondition::In(values));
        Ok(self)
    }

    pub fn range_gt(mut self, field: RangeField, value: i64) -> Self {
        self.filter
            .range_conditions
            .insert(field, RangeCondition::Gt(value));
        self
    }

    pub fn range_gte(mut self, field: RangeField, value: i64) -> Self {
        self.filter
            .range_conditions
            .insert(field, RangeCondition::Gte(value));
        self
    }

    pub fn range_lt(mut self, field: RangeField, value: i64) -> Self {
        self.filter
            .range_conditions
            .insert(field, RangeCondition::Lt(value));
        self
    }

    pub fn range_lte(mut self, field: RangeField, value: i64) -> Self {
        self.filter
            .range_conditions
            .insert(field, RangeCondition::Lte(value));
        self
    }

    /// Match `from..to` with both bounds inclusive.
    pub fn range_between(self, field: RangeField, from: i64, to: i64) -> RecordsResult<Self> {
        self.range_between_bounds(field, from, true, to, true)
    }

    pub fn range_between_bounds(
        mut self,
        field: RangeField,
        from: i64,
        from_inclusive: bool,
        to: i64,
        to_inclusive: bool,
    ) -> RecordsResult<Self> {
        if from > to {
            return Err(RecordsError::InvalidFilter(format!(
                "invalid range on {}: {from} > {to}",
                field.wire_name()
            )));
        }
        self.filter.range_conditions.insert(
            field,
            RangeCondition::Between {
                from,
                from_inclusive,
                to,
                to_inclusive,
            },
        );
        Ok(self)
    }

    /// Page size and offset. Limit must be 1 to [`MAX_LIMIT`].
    pub fn limit_and_offset(mut self, limit: u64, offset: u64) -> RecordsResult<Self> {
        if limit < 1 || limit > MAX_LIMIT {
            return Err(RecordsError::InvalidFilter(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }
        self.filter.limit = limit;
        self.filter.offset = offset;
        Ok(self)
    }

    pub fn build(self) -> FindFilter {
        self.filter
    }
}
