//! Logger metrics for observability
//!
//! Counters for submitted, dispatched, filtered and dropped records, sink
//! failures and queue pressure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use async_field_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_dispatched();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.dispatched_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted into the queue
    submitted: AtomicU64,

    /// Records written to the sink successfully
    dispatched: AtomicU64,

    /// Records discarded below the minimum level
    filtered: AtomicU64,

    /// Records dropped by a non-blocking overflow policy
    dropped: AtomicU64,

    /// Records lost to an encoder or sink failure
    sink_failures: AtomicU64,

    /// Number of times a producer found the queue full
    queue_full_events: AtomicU64,

    /// Number of times a producer waited for queue space
    block_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted_count(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failure_count(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    /// Record an enqueued record; returns the previous count
    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been submitted or dropped.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.submitted_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted_count()),
            dispatched: AtomicU64::new(self.dispatched_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            sink_failures: AtomicU64::new(self.sink_failure_count()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.submitted_count(), 0);
        assert_eq!(metrics.dispatched_count(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.sink_failure_count(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn test_metrics_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_dropped(), 0);
        assert_eq!(metrics.dropped_count(), 1);
        metrics.record_dropped();
        assert_eq!(metrics.dropped_count(), 2);
    }

    #[test]
    fn test_metrics_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_submitted();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_dropped();

        let snapshot = metrics.clone();
        metrics.record_dropped();

        assert_eq!(metrics.dropped_count(), 2);
        assert_eq!(snapshot.dropped_count(), 1);
    }
}
