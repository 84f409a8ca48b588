//! Logging macros for ergonomic log message formatting.
//!
//! `fields!` builds the call-site field list. The level macros accept an
//! optional bracketed field list followed by `format!` arguments.
//!
//! # Examples
//!
//! ```
//! use async_field_logger::prelude::*;
//!
//! let logger = Logger::builder("api")
//!     .sink(WriterSink::new(std::io::sink()))
//!     .build()
//!     .unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! let user_id = 42;
//! info!(logger, ["user_id" => user_id, "action" => "login"], "User {} logged in", user_id);
//! ```

/// Build a list of call-site fields.
///
/// # Examples
///
/// ```
/// use async_field_logger::fields;
///
/// let fields = fields! { "order_id" => "42", "attempt" => 3 };
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "order_id");
///
/// let none = fields![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use async_field_logger::prelude::*;
/// # let logger = Logger::builder("api").sink(WriterSink::new(std::io::sink())).build().unwrap();
/// use async_field_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Error, ["code" => 500], "request failed");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, [$($key:expr => $value:expr),* $(,)?], $($arg:tt)+) => {
        $logger.log($level, ::std::format!($($arg)+), $crate::fields![$($key => $value),*])
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format!($($arg)+), $crate::fields![])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use async_field_logger::prelude::*;
/// # let logger = Logger::builder("api").sink(WriterSink::new(std::io::sink())).build().unwrap();
/// use async_field_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, ["counter" => 10], "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, [$($fields:tt)*], $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, [$($fields)*], $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use async_field_logger::prelude::*;
/// # let logger = Logger::builder("api").sink(WriterSink::new(std::io::sink())).build().unwrap();
/// use async_field_logger::info;
/// info!(logger, "Application started");
/// info!(logger, ["users" => 100], "Processing {} users", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, [$($fields:tt)*], $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, [$($fields)*], $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use async_field_logger::prelude::*;
/// # let logger = Logger::builder("api").sink(WriterSink::new(std::io::sink())).build().unwrap();
/// use async_field_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, ["code" => 500], "Request failed with code {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, [$($fields:tt)*], $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, [$($fields)*], $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
///
/// # Examples
///
/// ```
/// # use async_field_logger::prelude::*;
/// # let logger = Logger::builder("api").sink(WriterSink::new(std::io::sink())).build().unwrap();
/// use async_field_logger::fatal;
/// fatal!(logger, "System shutting down");
/// fatal!(logger, ["component" => "storage"], "Critical failure in {}", "storage");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, [$($fields:tt)*], $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, [$($fields)*], $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
