//! Timestamp formatting for encoded records

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format used by the encoders
///
/// # Examples
///
/// ```
/// use async_field_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let rendered = TimestampFormat::Rfc3339.format(&Utc::now()).unwrap();
/// assert!(rendered.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with second precision: `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601Millis,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Reject custom patterns chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "timestamp_format",
                    format!("invalid strftime pattern '{}'", format_str),
                ));
            }
        }
        Ok(())
    }

    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        let rendered = match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601Millis => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // `to_string` would panic on a bad pattern
                let mut out = String::new();
                write!(out, "{}", datetime.format(format_str)).map_err(|_| {
                    LoggerError::encoder(
                        "timestamp",
                        format!("invalid strftime pattern '{}'", format_str),
                    )
                })?;
                out
            }
        };
        Ok(rendered)
    }

    /// JSON form: a number for Unix formats, a string otherwise
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> Result<serde_json::Value> {
        match self {
            TimestampFormat::UnixMillis => Ok(serde_json::Value::Number(
                datetime.timestamp_millis().into(),
            )),
            _ => self.format(datetime).map(serde_json::Value::String),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08T10:30:45Z");
    }

    #[test]
    fn test_iso8601_millis_format() {
        let result = TimestampFormat::Iso8601Millis.format(&fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_unix_millis_is_numeric_in_json() {
        let value = TimestampFormat::UnixMillis.to_json_value(&fixed_datetime()).unwrap();
        assert_eq!(value, serde_json::json!(1736332245123_i64));
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()).unwrap(), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let format = TimestampFormat::Custom("%Q".to_string());

        assert!(matches!(
            format.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            format.format(&fixed_datetime()),
            Err(LoggerError::EncoderError { .. })
        ));
        assert!(TimestampFormat::Custom("%Y".to_string()).validate().is_ok());
        assert!(TimestampFormat::Rfc3339.validate().is_ok());
    }

    #[test]
    fn test_default_is_rfc3339() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Rfc3339);
    }
}
