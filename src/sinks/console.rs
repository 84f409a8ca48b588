//! Console sink implementation

use crate::core::{LogLevel, Result, Sink};
use std::io::{self, Write};

/// Writes rendered records to standard output
///
/// Optionally routes `error` and `fatal` records to standard error.
pub struct ConsoleSink {
    errors_to_stderr: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            errors_to_stderr: false,
        }
    }

    /// Send `error` and `fatal` records to stderr instead of stdout
    #[must_use]
    pub fn with_stderr_for_errors(mut self, enable: bool) -> Self {
        self.errors_to_stderr = enable;
        self
    }

    fn uses_stderr(&self, level: LogLevel) -> bool {
        self.errors_to_stderr && level >= LogLevel::Error
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        if self.uses_stderr(level) {
            io::stderr().lock().write_all(line)?;
        } else {
            io::stdout().lock().write_all(line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we may write to both
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
