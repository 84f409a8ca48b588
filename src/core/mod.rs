//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod queue;
pub mod record;
pub mod sink;
pub mod timestamp;
pub mod worker;

pub use config::{LoggerConfig, LOG_FORMAT_ENV, LOG_LEVEL_ENV, LOG_QUEUE_CAPACITY_ENV};
pub use encoder::{Encoder, OutputFormat};
pub use error::{LoggerError, Result};
pub use fields::{merge, Field, FieldValue, Fields};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT, SERVICE_KEY};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use queue::{
    bounded_queue, Command, QueueReceiver, QueueSender, Submission, DEFAULT_QUEUE_CAPACITY,
};
pub use record::LogRecord;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
pub use worker::{DispatchWorker, SinkFailureCallback, WorkerState, WorkerStatus, WORKER_THREAD_NAME};
