//! Encoder trait and output format selection
//!
//! Provides different output formats for log records:
//! - Json: flat JSON object per line (default)
//! - Logfmt: key=value pairs compatible with log aggregation tools
//! - Text: human-readable format

use super::{error::Result, record::LogRecord, timestamp::TimestampFormat};
use crate::encoders::{JsonEncoder, LogfmtEncoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Renders a record to one newline-terminated line of bytes
pub trait Encoder: Send {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        (**self).render(record)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `{"level":"info","message":"Request processed","service":"api","time":"2025-01-08T10:30:45Z"}`
    #[default]
    Json,

    /// Example: `time=2025-01-08T10:30:45Z level=info message="Request processed" service=api`
    Logfmt,

    /// Example: `[2025-01-08T10:30:45Z] [INFO ] Request processed service=api`
    Text,
}

impl OutputFormat {
    /// Build the default encoder for this format
    pub fn encoder(&self, timestamp_format: TimestampFormat) -> Box<dyn Encoder> {
        match self {
            OutputFormat::Json => Box::new(JsonEncoder::new().with_timestamp_format(timestamp_format)),
            OutputFormat::Logfmt => {
                Box::new(LogfmtEncoder::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Text => Box::new(TextEncoder::new().with_timestamp_format(timestamp_format)),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Logfmt => "logfmt",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::Logfmt),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("LOGFMT".parse::<OutputFormat>(), Ok(OutputFormat::Logfmt));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_every_format_renders_one_line() {
        let record = LogRecord::new(
            LogLevel::Info,
            "hello",
            Fields::new().with_field("service", "svc"),
        );

        for format in [OutputFormat::Json, OutputFormat::Logfmt, OutputFormat::Text] {
            let encoder = format.encoder(TimestampFormat::default());
            let bytes = encoder.render(&record).unwrap();
            let line = String::from_utf8(bytes).unwrap();
            assert!(line.ends_with('\n'), "{} output not newline-terminated", format);
            assert_eq!(line.matches('\n').count(), 1);
        }
    }
}
