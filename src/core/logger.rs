//! Logger facade
//!
//! A `Logger` owns its base context, the producer side of one bounded queue
//! and the one dispatch worker draining it. Submission methods only package
//! the record and enqueue it; encoding and writing happen on the worker.

use super::{
    config::LoggerConfig,
    encoder::{Encoder, OutputFormat},
    error::{LoggerError, Result},
    fields::{Field, FieldValue, Fields},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    queue::{bounded_queue, QueueSender, Submission, DEFAULT_QUEUE_CAPACITY},
    record::LogRecord,
    sink::Sink,
    timestamp::TimestampFormat,
    worker::{DispatchWorker, SinkFailureCallback, WorkerState, WorkerStatus},
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped without an explicit [`Logger::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Key under which the service identity is stored in the base context
pub const SERVICE_KEY: &str = "service";

/// Asynchronous structured logger
///
/// # Example
///
/// ```no_run
/// use async_field_logger::{fields, Logger};
///
/// let logger = Logger::new("orders-service").expect("valid identity");
/// logger.info("order placed", fields! { "order_id" => "42" });
/// logger.shutdown(std::time::Duration::from_secs(1)).expect("drained");
/// ```
pub struct Logger {
    service: String,
    base: Arc<Fields>,
    min_level: RwLock<LogLevel>,
    /// `None` once the queue is closed
    sender: RwLock<Option<QueueSender>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    status: WorkerStatus,
    metrics: Arc<LoggerMetrics>,
    capacity: usize,
}

impl Logger {
    /// Create a logger with the default JSON encoder and stdout sink
    ///
    /// Fails with `InvalidIdentity` if `service` is empty.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        Self::builder(service).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use async_field_logger::prelude::*;
    ///
    /// let logger = Logger::builder("billing")
    ///     .min_level(LogLevel::Info)
    ///     .queue_capacity(1000)
    ///     .sink(WriterSink::new(std::io::sink()))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder(service: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(service)
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    /// Submit a record, returning `QueueClosed` after shutdown
    ///
    /// Blocks only when the queue is full and the policy is `Block`.
    pub fn try_log<I>(&self, level: LogLevel, message: impl Into<String>, fields: I) -> Result<Submission>
    where
        I: IntoIterator<Item = Field>,
    {
        let sender = self.producer()?;

        if level < *self.min_level.read() {
            self.metrics.record_filtered();
            return Ok(Submission::Filtered);
        }

        let record = LogRecord::from_parts(level, message, &self.base, fields);
        sender.send(record)
    }

    /// A sender of our own for one submission
    ///
    /// The lock is held only while cloning. A producer waiting on a full
    /// queue keeps the channel open through its clone, so the worker drains
    /// its record even if `shutdown` runs meanwhile.
    fn producer(&self) -> Result<QueueSender> {
        self.sender
            .read()
            .as_ref()
            .cloned()
            .ok_or(LoggerError::QueueClosed)
    }

    /// Submit a record
    ///
    /// # Panics
    ///
    /// Panics when called after [`shutdown`](Self::shutdown): using a closed
    /// logger is a lifecycle bug in the caller and is never silently ignored.
    pub fn log<I>(&self, level: LogLevel, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        if let Err(e) = self.try_log(level, message, fields) {
            panic!("{} record submitted to logger '{}': {}", level, self.service, e);
        }
    }

    #[inline]
    pub fn debug<I>(&self, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info<I>(&self, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn error<I>(&self, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(LogLevel::Error, message, fields);
    }

    /// Submit a `fatal` record; the process keeps running
    #[inline]
    pub fn fatal<I>(&self, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(LogLevel::Fatal, message, fields);
    }

    /// Wait until every record submitted before this call is written and the sink flushed
    pub fn flush(&self) -> Result<()> {
        let ack = self.producer()?.send_flush()?;

        // A dropped ack channel means the worker died before reaching the marker
        ack.recv().map_err(|_| LoggerError::WorkerPanicked)
    }

    /// Close the queue, let the worker drain it, and wait for the worker to stop
    ///
    /// Must be the last operation on a logger: later submissions panic
    /// (or return `QueueClosed` through [`try_log`](Self::try_log)).
    /// Producers already waiting on a full queue are not rejected; their
    /// records are written before the worker stops.
    ///
    /// # Errors
    ///
    /// - `QueueClosed` if the logger was already shut down
    /// - `ShutdownTimeout` if the worker is still draining after `timeout`;
    ///   it keeps draining in the background
    /// - `WorkerPanicked` if the worker thread panicked
    ///
    /// # Example
    ///
    /// ```no_run
    /// use async_field_logger::{fields, Logger};
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new("api").unwrap();
    /// logger.info("Important message", fields![]);
    ///
    /// if let Err(e) = logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: {}", e);
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        let sender = self.sender.write().take();
        let Some(sender) = sender else {
            return Err(LoggerError::QueueClosed);
        };

        self.status.begin_draining();
        drop(sender);

        let Some(handle) = self.worker.lock().take() else {
            return Ok(());
        };

        loop {
            if handle.is_finished() {
                return handle.join().map_err(|_| LoggerError::WorkerPanicked);
            }

            if start.elapsed() >= timeout {
                return Err(LoggerError::ShutdownTimeout(timeout));
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(5));
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Fields attached to every record this logger produces
    pub fn base_fields(&self) -> &Fields {
        &self.base
    }

    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    /// Records currently waiting in the queue (0 once closed)
    pub fn queue_len(&self) -> usize {
        self.sender.read().as_ref().map_or(0, QueueSender::len)
    }

    pub fn worker_state(&self) -> WorkerState {
        self.status.get()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use async_field_logger::prelude::*;
    ///
    /// let logger = Logger::builder("api")
    ///     .sink(WriterSink::new(std::io::sink()))
    ///     .build()
    ///     .unwrap();
    ///
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Dispatched: {}", metrics.dispatched_count());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_closed() {
            return;
        }

        if let Err(e) = self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
            eprintln!("[LOGGER ERROR] Shutdown of logger '{}' failed: {}", self.service, e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' shut down with {} dropped logs (drop rate: {:.2}%)",
                self.service,
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use async_field_logger::prelude::*;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let logger = Logger::builder("checkout")
///     .base_field("region", "eu-west-1")
///     .min_level(LogLevel::Debug)
///     .output_format(OutputFormat::Logfmt)
///     .sink(WriterSink::new(std::io::sink()))
///     .queue_capacity(500)
///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
///     .on_overflow(Arc::new(|count: u64| {
///         eprintln!("ALERT: {} logs dropped", count);
///     }))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    service: String,
    base_fields: Vec<Field>,
    capacity: usize,
    min_level: LogLevel,
    format: OutputFormat,
    timestamp_format: TimestampFormat,
    encoder: Option<Box<dyn Encoder>>,
    sink: Option<Box<dyn Sink>>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    on_sink_failure: Option<SinkFailureCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(service: impl Into<String>) -> Self {
        let defaults = LoggerConfig::default();
        Self {
            service: service.into(),
            base_fields: Vec::new(),
            capacity: defaults.queue_capacity,
            min_level: defaults.min_level,
            format: defaults.format,
            timestamp_format: TimestampFormat::default(),
            encoder: None,
            sink: None,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
            on_sink_failure: None,
        }
    }

    /// Apply capacity, level and format from a [`LoggerConfig`]
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        self.capacity = config.queue_capacity;
        self.min_level = config.min_level;
        self.format = config.format;
        self
    }

    /// Add a field to the base context
    ///
    /// The `service` key is reserved for the logger identity.
    #[must_use = "builder methods return a new value"]
    pub fn base_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.base_fields.push(Field::new(key, value));
        self
    }

    /// Number of records the queue holds (default [`DEFAULT_QUEUE_CAPACITY`])
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Pick one of the built-in encoders; ignored when [`encoder`](Self::encoder) is set
    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Timestamp format for the built-in encoders
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Use a custom encoder
    #[must_use = "builder methods return a new value"]
    pub fn encoder<E: Encoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Some(Box::new(encoder));
        self
    }

    /// Destination for rendered records (default: stdout)
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set the overflow policy (default: `Block`)
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Set a callback for overflow notifications
    ///
    /// Only fires under the dropping policies. The parameter is the total
    /// count of dropped records.
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Receive encoder and sink failures instead of having them printed to stderr
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_failure(mut self, callback: SinkFailureCallback) -> Self {
        self.on_sink_failure = Some(callback);
        self
    }

    /// Validate the configuration, start the dispatch worker and return the logger
    pub fn build(self) -> Result<Logger> {
        if self.service.trim().is_empty() {
            return Err(LoggerError::InvalidIdentity);
        }
        self.timestamp_format.validate()?;

        let mut base: Fields = self
            .base_fields
            .into_iter()
            .filter(|field| !field.key.is_empty())
            .map(|field| (field.key, field.value))
            .collect();
        base.insert(SERVICE_KEY, self.service.as_str());

        let metrics = Arc::new(LoggerMetrics::new());
        let (sender, receiver) = bounded_queue(
            self.capacity,
            self.overflow_policy,
            Arc::clone(&metrics),
            self.on_overflow,
        )?;

        let encoder = match self.encoder {
            Some(encoder) => encoder,
            None => self.format.encoder(self.timestamp_format),
        };
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::new()));

        let status = WorkerStatus::new();
        let handle = DispatchWorker::new(
            receiver,
            encoder,
            sink,
            Arc::clone(&metrics),
            status.clone(),
            self.on_sink_failure,
        )
        .spawn()?;

        Ok(Logger {
            service: self.service,
            base: Arc::new(base),
            min_level: RwLock::new(self.min_level),
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(handle)),
            status,
            metrics,
            capacity: self.capacity,
        })
    }
}

impl Default for LoggerBuilder {
    /// Builder without an identity; `build` fails until one is supplied via [`Logger::builder`]
    fn default() -> Self {
        Self::new(String::new())
    }
}
