//! Logfmt encoder (key=value pairs)

use super::{escape_control, field_key};
use crate::core::{Encoder, FieldValue, LogRecord, Result, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct LogfmtEncoder {
    timestamp_format: TimestampFormat,
}

impl LogfmtEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_value(value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) => escape_value(s),
            FieldValue::Map(_) => quote_value(&value.to_string()),
            other => other.to_string(),
        }
    }
}

impl Encoder for LogfmtEncoder {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut parts = Vec::with_capacity(record.fields.len() + 3);

        parts.push(format!(
            "time={}",
            escape_value(&self.timestamp_format.format(&record.timestamp)?)
        ));
        parts.push(format!("level={}", record.level.to_str()));
        // Message is always quoted
        parts.push(format!("message={}", quote_value(&record.message)));

        for (key, value) in record.fields.sorted() {
            parts.push(format!(
                "{}={}",
                escape_key(&field_key(key)),
                Self::format_value(value)
            ));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

/// Keys of alphanumerics, `_`, `-` and `.` are written bare, anything else quoted
fn escape_key(key: &str) -> String {
    if !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        key.to_string()
    } else {
        quote_value(key)
    }
}

/// Quote a value only when it needs it
fn escape_value(value: &str) -> String {
    if value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control())
    {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escape_control(&escaped))
}
