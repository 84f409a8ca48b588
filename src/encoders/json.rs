//! JSON encoder for structured logging

use super::{field_key, LEVEL_KEY, MESSAGE_KEY, TIME_KEY};
use crate::core::{Encoder, LogRecord, Result, TimestampFormat};

/// Renders each record as a single-line flat JSON object (JSONL)
///
/// The object carries `level`, `message`, `time` and every merged field.
/// A field named like one of the reserved keys is written as
/// `fields.<key>` so it cannot overwrite the record's own values.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    timestamp_format: TimestampFormat,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn to_object(&self, record: &LogRecord) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut object = serde_json::Map::with_capacity(record.fields.len() + 3);

        for (key, value) in record.fields.iter() {
            object.insert(field_key(key).into_owned(), value.to_json_value());
        }

        object.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        object.insert(
            MESSAGE_KEY.to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        object.insert(
            TIME_KEY.to_string(),
            self.timestamp_format.to_json_value(&record.timestamp)?,
        );

        Ok(object)
    }
}

impl Encoder for JsonEncoder {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let object = serde_json::Value::Object(self.to_object(record)?);

        let mut bytes = serde_json::to_vec(&object)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}
