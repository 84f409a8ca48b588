//! Overflow policies for the bounded record queue
//!
//! When the queue is full, the policy decides whether the producer waits
//! or the record is dropped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Policy for handling a full queue
///
/// # Example
///
/// ```
/// use async_field_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: block the producer
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
///
/// // Wait a bounded time, then drop
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Block until space is available
    ///
    /// No record is ever lost to overflow; producers are throttled to the
    /// speed of the sink instead. A stalled sink stalls every producer.
    #[default]
    Block,

    /// Block with timeout, then drop
    BlockWithTimeout(Duration),

    /// Drop the incoming record when the queue is full
    DropNewest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}

/// Callback type for overflow notifications
///
/// The parameter is the total count of dropped records so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
