//! Single background dispatch worker
//!
//! The worker is the only reader of the queue and the only writer to the
//! sink, so records reach the sink in exactly the order they were enqueued
//! and rendered lines never interleave.

use super::{
    encoder::Encoder,
    error::{LoggerError, Result},
    metrics::LoggerMetrics,
    queue::{Command, QueueReceiver},
    record::LogRecord,
    sink::Sink,
};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Name given to the dispatch thread
pub const WORKER_THREAD_NAME: &str = "log-dispatch";

/// Callback invoked for every record lost to an encoder or sink failure
pub type SinkFailureCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Lifecycle of the dispatch worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Pulling and dispatching records
    Running = 0,
    /// Queue closed, finishing buffered records
    Draining = 1,
    /// Terminal
    Stopped = 2,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Running => write!(f, "running"),
            WorkerState::Draining => write!(f, "draining"),
            WorkerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Worker state shared between the logger and its worker thread
#[derive(Debug, Clone)]
pub struct WorkerStatus {
    state: Arc<AtomicU8>,
}

impl WorkerStatus {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(WorkerState::Running as u8)),
        }
    }

    pub fn get(&self) -> WorkerState {
        match self.state.load(Ordering::Acquire) {
            0 => WorkerState::Running,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }

    /// Running -> Draining; a stopped worker stays stopped
    pub(crate) fn begin_draining(&self) {
        let _ = self.state.compare_exchange(
            WorkerState::Running as u8,
            WorkerState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub(crate) fn mark_stopped(&self) {
        self.state.store(WorkerState::Stopped as u8, Ordering::Release);
    }
}

impl Default for WorkerStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks the worker stopped however its thread exits, panics included
struct StopGuard(WorkerStatus);

impl Drop for StopGuard {
    fn drop(&mut self) {
        self.0.mark_stopped();
    }
}

pub struct DispatchWorker {
    receiver: QueueReceiver,
    encoder: Box<dyn Encoder>,
    sink: Box<dyn Sink>,
    metrics: Arc<LoggerMetrics>,
    status: WorkerStatus,
    on_sink_failure: Option<SinkFailureCallback>,
}

impl DispatchWorker {
    pub fn new(
        receiver: QueueReceiver,
        encoder: Box<dyn Encoder>,
        sink: Box<dyn Sink>,
        metrics: Arc<LoggerMetrics>,
        status: WorkerStatus,
        on_sink_failure: Option<SinkFailureCallback>,
    ) -> Self {
        Self {
            receiver,
            encoder,
            sink,
            metrics,
            status,
            on_sink_failure,
        }
    }

    /// Start the worker on its own named thread
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    /// Consume commands until the queue is closed and empty
    pub fn run(mut self) {
        let _guard = StopGuard(self.status.clone());

        while let Some(command) = self.receiver.recv() {
            self.handle(command);

            // Drain whatever is already buffered, then flush once
            while let Some(command) = self.receiver.try_recv() {
                self.handle(command);
            }
            self.flush_sink();
        }

        self.flush_sink();
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Dispatch(record) => self.dispatch(record),
            Command::Flush(ack) => {
                self.flush_sink();
                // The waiting caller may have given up
                let _ = ack.send(());
            }
        }
    }

    fn dispatch(&mut self, record: LogRecord) {
        match self.render_and_emit(&record) {
            Ok(()) => {
                self.metrics.record_dispatched();
            }
            Err(error) => {
                self.metrics.record_sink_failure();
                self.report(&record, &error);
            }
        }
    }

    /// Encode then emit, attributing errors and panics to the stage that raised them
    fn render_and_emit(&mut self, record: &LogRecord) -> Result<()> {
        let encoder = &self.encoder;
        let line = match catch_unwind(AssertUnwindSafe(|| encoder.render(record))) {
            Ok(Ok(line)) => line,
            Ok(Err(e)) => return Err(self.classify_encoder(e)),
            Err(payload) => {
                return Err(LoggerError::encoder(
                    self.encoder.name(),
                    format!("panicked: {}", panic_message(payload.as_ref())),
                ))
            }
        };

        let sink = &mut self.sink;
        match catch_unwind(AssertUnwindSafe(|| sink.emit(record.level, &line))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(self.classify_sink(e)),
            Err(payload) => Err(LoggerError::sink_failure(
                self.sink.name(),
                format!("panicked: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    fn classify_encoder(&self, error: LoggerError) -> LoggerError {
        match error {
            LoggerError::EncoderError { .. } => error,
            other => LoggerError::encoder(self.encoder.name(), other.to_string()),
        }
    }

    fn classify_sink(&self, error: LoggerError) -> LoggerError {
        match error {
            LoggerError::SinkFailure { .. } => error,
            other => LoggerError::sink_failure(self.sink.name(), other.to_string()),
        }
    }

    fn report(&self, record: &LogRecord, error: &LoggerError) {
        match self.on_sink_failure {
            Some(ref callback) => callback(error),
            None => eprintln!(
                "[LOGGER ERROR] Dropped {} record '{}': {}",
                record.level, record.message, error
            ),
        }
    }

    fn flush_sink(&mut self) {
        let sink = &mut self.sink;
        let outcome = catch_unwind(AssertUnwindSafe(|| sink.flush()));

        let error = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => LoggerError::sink_failure(self.sink.name(), format!("flush failed: {}", e)),
            Err(payload) => LoggerError::sink_failure(
                self.sink.name(),
                format!("panicked during flush: {}", panic_message(payload.as_ref())),
            ),
        };

        match self.on_sink_failure {
            Some(ref callback) => callback(&error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
