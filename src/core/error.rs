//! Error types for the logging facade

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Logger constructed with an empty service identity
    #[error("Invalid service identity: must not be empty")]
    InvalidIdentity,

    /// Submission or shutdown after the queue was closed
    #[error("Log queue closed: logger already shut down")]
    QueueClosed,

    /// Sink rejected a rendered record
    #[error("Sink '{sink}' failed: {message}")]
    SinkFailure { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Dispatch worker did not drain within the shutdown timeout
    #[error("Dispatch worker did not stop within {0:?}")]
    ShutdownTimeout(Duration),

    /// Dispatch worker thread panicked
    #[error("Dispatch worker thread panicked")]
    WorkerPanicked,

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Encoder error with format name
    #[error("Encoder error ({format}): {message}")]
    EncoderError { format: String, message: String },
}

impl LoggerError {
    /// Create a sink failure error
    pub fn sink_failure(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkFailure {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an encoder error
    pub fn encoder(format: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::EncoderError {
            format: format.into(),
            message: message.into(),
        }
    }
}
