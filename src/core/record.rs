//! Log record structure

use super::fields::{merge, Field, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted log event
///
/// Built by the facade at submission time and moved into the queue; the
/// dispatch worker consumes it exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub fields: Fields,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>, fields: Fields) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields,
        }
    }

    /// Snapshot `base` and overlay the call-site fields
    pub fn from_parts<I>(level: LogLevel, message: impl Into<String>, base: &Fields, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Self::new(level, message, merge(base, fields))
    }
}
