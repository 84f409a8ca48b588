//! # Async Field Logger
//!
//! A structured logging facade with a service identity, per-call key/value
//! fields and asynchronous, order-preserving dispatch.
//!
//! Every record carries the logger's base context (at least `service`)
//! merged with the fields given at the call site. Records are placed on a
//! bounded queue and written by a single background worker, so callers never
//! wait on I/O unless the queue is full.
//!
//! ## Features
//!
//! - **Structured**: typed field values, call-site fields override the base context
//! - **Ordered**: one worker, one queue; records reach the sink in submission order
//! - **Bounded**: backpressure by default, optional dropping overflow policies
//! - **Pluggable**: JSON, logfmt and text encoders; console, file and writer sinks
//!
//! ## Example
//!
//! ```
//! use async_field_logger::prelude::*;
//! use std::time::Duration;
//!
//! let logger = Logger::builder("orders-service")
//!     .sink(WriterSink::new(std::io::sink()))
//!     .build()
//!     .unwrap();
//!
//! logger.info("order placed", fields! { "order_id" => "42" });
//! info!(logger, "{} orders pending", 3);
//!
//! logger.shutdown(Duration::from_secs(1)).unwrap();
//! ```

pub mod core;
pub mod encoders;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Encoder, Field, FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, OverflowCallback, OverflowPolicy,
        Result, Sink, Submission, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::encoders::{JsonEncoder, LogfmtEncoder, TextEncoder};
    pub use crate::sinks::{ConsoleSink, FileSink, WriterSink};
    pub use crate::{debug, error, fatal, fields, info, log};
}

pub use crate::core::{
    merge, Encoder, Field, FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, OverflowCallback, OverflowPolicy,
    Result, Sink, SinkFailureCallback, Submission, TimestampFormat, WorkerState,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use encoders::{JsonEncoder, LogfmtEncoder, TextEncoder};
pub use sinks::{ConsoleSink, FileSink, WriterSink};
