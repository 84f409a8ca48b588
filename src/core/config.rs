//! Logger configuration
//!
//! `LoggerConfig` carries the tunables that are commonly set per deployment.
//! It deserializes from any serde format and can be read from the
//! environment with [`LoggerConfig::from_env`].

use super::{
    encoder::OutputFormat,
    error::{LoggerError, Result},
    log_level::LogLevel,
    queue::DEFAULT_QUEUE_CAPACITY,
};
use serde::{Deserialize, Serialize};

/// Queue capacity, e.g. `100`
pub const LOG_QUEUE_CAPACITY_ENV: &str = "LOG_QUEUE_CAPACITY";

/// Minimum level: `debug`, `info`, `error` or `fatal`
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Output format: `json`, `logfmt` or `text`
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub queue_capacity: usize,
    pub min_level: LogLevel,
    pub format: OutputFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            min_level: LogLevel::Debug,
            format: OutputFormat::Json,
        }
    }
}

impl LoggerConfig {
    /// Read overrides from `LOG_QUEUE_CAPACITY`, `LOG_LEVEL` and `LOG_FORMAT`
    ///
    /// Unset variables keep their defaults; unparsable values are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_QUEUE_CAPACITY_ENV) {
            config.queue_capacity = raw.trim().parse::<usize>().map_err(|_| {
                LoggerError::config(
                    LOG_QUEUE_CAPACITY_ENV,
                    format!("expected a positive integer, got '{}'", raw),
                )
            })?;
        }

        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            config.min_level = raw
                .parse::<LogLevel>()
                .map_err(|e: String| LoggerError::config(LOG_LEVEL_ENV, e))?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            config.format = raw
                .parse::<OutputFormat>()
                .map_err(|e: String| LoggerError::config(LOG_FORMAT_ENV, e))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue_capacity",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
