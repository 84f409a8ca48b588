//! Property-based tests for async_field_logger using proptest

use async_field_logger::prelude::*;
use async_field_logger::{merge, JsonEncoder};
use proptest::prelude::*;
use std::collections::HashMap;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn any_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(FieldValue::String),
        any::<i64>().prop_map(FieldValue::Int),
        any::<bool>().prop_map(FieldValue::Bool),
        Just(FieldValue::Null),
    ]
}

fn any_fields(max: usize) -> impl Strategy<Value = Vec<(String, FieldValue)>> {
    prop::collection::vec(("[a-e]{1,2}", any_value()), 0..max)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level, whatever the case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering follows severity
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a.to_string(), a.to_str());
    }
}

// ============================================================================
// Merge Tests
// ============================================================================

proptest! {
    /// Every key of base and overrides ends up in the result, and nothing else
    #[test]
    fn test_merge_key_union(base in any_fields(8), overrides in any_fields(8)) {
        let base: Fields = base.into_iter().collect();
        let merged = merge(&base, overrides.iter().cloned().map(Field::from));

        for (key, _) in base.iter() {
            prop_assert!(merged.contains_key(key));
        }
        for (key, _) in &overrides {
            prop_assert!(merged.contains_key(key));
        }
        let expected = base
            .iter()
            .map(|(k, _)| k.clone())
            .chain(overrides.iter().map(|(k, _)| k.clone()))
            .collect::<std::collections::HashSet<_>>();
        prop_assert_eq!(merged.len(), expected.len());
    }

    /// The last override for a key wins; untouched keys keep the base value
    #[test]
    fn test_merge_last_write_wins(base in any_fields(8), overrides in any_fields(8)) {
        let base: Fields = base.into_iter().collect();
        let merged = merge(&base, overrides.iter().cloned().map(Field::from));

        let mut last: HashMap<&str, &FieldValue> = HashMap::new();
        for (key, value) in &overrides {
            last.insert(key.as_str(), value);
        }

        for (key, value) in merged.iter() {
            match last.get(key.as_str()) {
                Some(expected) => {
                    prop_assert_eq!(value, *expected);
                }
                None => {
                    prop_assert_eq!(Some(value), base.get(key));
                }
            }
        }
    }

    /// Merging never mutates the base context
    #[test]
    fn test_merge_leaves_base_untouched(base in any_fields(8), overrides in any_fields(8)) {
        let base: Fields = base.into_iter().collect();
        let snapshot = base.clone();
        let _ = merge(&base, overrides.into_iter().map(Field::from));
        prop_assert_eq!(base, snapshot);
    }
}

// ============================================================================
// Encoder Tests
// ============================================================================

proptest! {
    /// JSON output is always one parseable line carrying the record's own values
    #[test]
    fn test_json_single_line(
        level in any_level(),
        message in "\\PC{0,40}",
        fields in any_fields(6),
    ) {
        let record = LogRecord::new(level, message.clone(), fields.into_iter().collect());
        let bytes = JsonEncoder::new().render(&record).unwrap();
        let line = String::from_utf8(bytes).unwrap();

        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(value["level"].as_str(), Some(level.to_str()));
        prop_assert_eq!(value["message"].as_str(), Some(message.as_str()));
    }
}
