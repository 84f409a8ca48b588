//! Human-readable text encoder

use super::escape_control;
use crate::core::{Encoder, LogRecord, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct TextEncoder {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl TextEncoder {
    pub fn new() -> Self {
        Self {
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Colour the level tag with ANSI codes (needs the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn level_tag(&self, record: &LogRecord) -> String {
        let tag = format!("{:5}", record.level.to_str().to_uppercase());

        #[cfg(feature = "console")]
        {
            if self.use_colors {
                return tag.color(record.level.color_code()).to_string();
            }
        }

        tag
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for TextEncoder {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&record.timestamp)?,
            self.level_tag(record),
            escape_control(&record.message)
        );

        if !record.fields.is_empty() {
            line.push(' ');
            line.push_str(&escape_control(&record.fields.format_fields()));
        }

        line.push('\n');
        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}
