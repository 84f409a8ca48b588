//! Shared sinks for the integration tests

#![allow(dead_code)]

use async_field_logger::{LogLevel, LoggerError, Result, Sink};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// Lines written so far, shared with the test body
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Records every emitted line in memory
pub struct CaptureSink {
    lines: Captured,
}

impl CaptureSink {
    pub fn new() -> (Self, Captured) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                lines: Arc::clone(&lines),
            },
            lines,
        )
    }
}

impl Sink for CaptureSink {
    fn emit(&mut self, _level: LogLevel, line: &[u8]) -> Result<()> {
        let line = String::from_utf8_lossy(line).trim_end().to_string();
        self.lines.lock().push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Capturing sink that waits for one permit per record
///
/// Lets a test stall the dispatch worker and release it on demand.
pub struct GateSink {
    inner: CaptureSink,
    permits: Receiver<()>,
}

/// Handle used to let records through a [`GateSink`]
#[derive(Clone)]
pub struct Gate {
    permits: Sender<()>,
}

impl Gate {
    pub fn release(&self, count: usize) {
        for _ in 0..count {
            let _ = self.permits.send(());
        }
    }
}

impl GateSink {
    pub fn new() -> (Self, Gate, Captured) {
        let (inner, lines) = CaptureSink::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { inner, permits: rx }, Gate { permits: tx }, lines)
    }
}

impl Sink for GateSink {
    fn emit(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        self.permits
            .recv()
            .map_err(|_| LoggerError::sink_failure("gate", "gate dropped"))?;
        self.inner.emit(level, line)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "gate"
    }
}

/// Rejects every line whose message contains `reject`
pub struct PickySink {
    inner: CaptureSink,
}

impl PickySink {
    pub fn new() -> (Self, Captured) {
        let (inner, lines) = CaptureSink::new();
        (Self { inner }, lines)
    }
}

impl Sink for PickySink {
    fn emit(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        if String::from_utf8_lossy(line).contains("reject") {
            return Err(LoggerError::sink_failure("picky", "refused record"));
        }
        self.inner.emit(level, line)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "picky"
    }
}

/// Parse captured JSON lines
pub fn parse(lines: &Captured) -> Vec<serde_json::Value> {
    lines
        .lock()
        .iter()
        .map(|line| serde_json::from_str(line).expect("line is valid JSON"))
        .collect()
}
