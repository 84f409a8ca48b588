//! Structured key-value fields and the field merger
//!
//! This module provides:
//! - `FieldValue`: the closed set of value shapes a field can carry
//! - `Field`: one call-site key/value pair
//! - `Fields`: a flat key -> value mapping (base context and merged records)
//! - `merge`: base context ⊕ call-site fields, last write wins

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Value type for structured logging fields
///
/// The core never interprets values; only encoders do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Map(BTreeMap<String, FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Map(_) => write!(f, "{}", self.to_json_value()),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Non-finite floats have no JSON number form and are stringified.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(i: $ty) -> Self {
                    FieldValue::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(map)
    }
}

/// A single call-site field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

/// Flat key -> value mapping with unique keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: HashMap<String, FieldValue>,
}

impl Fields {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    /// Add a field, replacing any previous value for the key
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Entries ordered by key, for encoders that want stable output
    pub fn sorted(&self) -> Vec<(&String, &FieldValue)> {
        let mut entries: Vec<_> = self.fields.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Format fields as sorted key=value pairs
    pub fn format_fields(&self) -> String {
        self.sorted()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// Merge a base context with call-site fields
///
/// Copies every base entry, then applies `overrides` in order. A repeated
/// key keeps its last value and an override always replaces a base entry.
/// Fields with an empty key are skipped. `base` is never modified.
pub fn merge<I>(base: &Fields, overrides: I) -> Fields
where
    I: IntoIterator<Item = Field>,
{
    let overrides = overrides.into_iter();
    let (hint, _) = overrides.size_hint();

    let mut merged = Fields::with_capacity(base.len() + hint);
    for (key, value) in base.iter() {
        merged.fields.insert(key.clone(), value.clone());
    }

    for field in overrides {
        if field.key.is_empty() {
            continue;
        }
        merged.fields.insert(field.key, field.value);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_creation() {
        let fields = Fields::new();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_fields_with_values() {
        let fields = Fields::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_fields_format_sorted() {
        let fields = Fields::new()
            .with_field("key2", 42)
            .with_field("key1", "value1");

        assert_eq!(fields.format_fields(), "key1=value1 key2=42");
    }

    #[test]
    fn test_merge_copies_base() {
        let base = Fields::new()
            .with_field("service", "api")
            .with_field("version", "1.0");

        let merged = merge(&base, vec![Field::new("user_id", 7)]);

        assert_eq!(merged.len(), 3);
        assert!(merged.contains_key("service"));
        assert!(merged.contains_key("version"));
        assert!(merged.contains_key("user_id"));
    }

    #[test]
    fn test_merge_override_wins_over_base() {
        let base = Fields::new().with_field("service", "api");

        let merged = merge(&base, vec![Field::new("service", "worker")]);

        assert_eq!(merged.get("service"), Some(&FieldValue::from("worker")));
        // Base is untouched
        assert_eq!(base.get("service"), Some(&FieldValue::from("api")));
    }

    #[test]
    fn test_merge_last_override_wins() {
        let merged = merge(
            &Fields::new(),
            vec![
                Field::new("attempt", 1),
                Field::new("other", "x"),
                Field::new("attempt", 3),
            ],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("attempt"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_merge_skips_empty_keys() {
        let merged = merge(&Fields::new(), vec![Field::new("", "ignored")]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from(u64::MAX), FieldValue::String(u64::MAX.to_string()));
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
        assert_eq!(FieldValue::from(2.5_f32), FieldValue::Float(2.5));
    }

    #[test]
    fn test_non_finite_float_is_stringified() {
        let value = FieldValue::Float(f64::NAN).to_json_value();
        assert_eq!(value, serde_json::Value::String("NaN".to_string()));
    }

    #[test]
    fn test_nested_map_to_json() {
        let mut inner = BTreeMap::new();
        inner.insert("city".to_string(), FieldValue::from("Oslo"));
        inner.insert("zip".to_string(), FieldValue::from(150));

        let value = FieldValue::Map(inner).to_json_value();
        assert_eq!(value["city"], "Oslo");
        assert_eq!(value["zip"], 150);
    }
}
