//! Sink trait for rendered log output destinations

use super::{error::Result, log_level::LogLevel};

/// Destination for rendered records
///
/// A sink is owned by the dispatch worker and only ever called from that
/// thread, so implementations need `Send` but not `Sync`.
pub trait Sink: Send {
    /// Write one rendered, newline-terminated record
    fn emit(&mut self, level: LogLevel, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        (**self).emit(level, line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
