//! Bounded FIFO queue between producers and the dispatch worker
//!
//! Built on a `crossbeam_channel::bounded` channel. Any number of producers
//! hold the sending side through the logger; the single dispatch worker owns
//! the receiving side. Closing the queue means dropping the last sender: the
//! receiver still yields everything buffered, then reports the end.

use super::{
    error::{LoggerError, Result},
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    record::LogRecord,
};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::Arc;

/// Default number of records the queue holds before the overflow policy applies
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Item carried by the queue
#[derive(Debug)]
pub enum Command {
    /// Encode and emit one record
    Dispatch(LogRecord),
    /// Flush the sink, then acknowledge on the enclosed channel
    Flush(Sender<()>),
}

/// Outcome of a submission that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Queued,
    /// The overflow policy discarded the record
    Dropped,
    /// Below the logger's minimum level, never enqueued
    Filtered,
}

/// Producer side of the record queue
///
/// Clones share one channel; it closes when the last clone is dropped.
#[derive(Clone)]
pub struct QueueSender {
    sender: Sender<Command>,
    capacity: usize,
    policy: OverflowPolicy,
    metrics: Arc<LoggerMetrics>,
    on_overflow: Option<OverflowCallback>,
}

/// Consumer side of the record queue
pub struct QueueReceiver {
    receiver: Receiver<Command>,
}

/// Create a bounded queue
///
/// Fails with `InvalidConfiguration` for a zero capacity.
pub fn bounded_queue(
    capacity: usize,
    policy: OverflowPolicy,
    metrics: Arc<LoggerMetrics>,
    on_overflow: Option<OverflowCallback>,
) -> Result<(QueueSender, QueueReceiver)> {
    if capacity == 0 {
        return Err(LoggerError::config(
            "queue",
            "capacity must be greater than zero",
        ));
    }

    let (sender, receiver) = bounded(capacity);
    Ok((
        QueueSender {
            sender,
            capacity,
            policy,
            metrics,
            on_overflow,
        },
        QueueReceiver { receiver },
    ))
}

impl QueueSender {
    /// Enqueue a record, applying the overflow policy when the queue is full
    ///
    /// Returns `QueueClosed` if the consumer side is gone.
    pub fn send(&self, record: LogRecord) -> Result<Submission> {
        match self.sender.try_send(Command::Dispatch(record)) {
            Ok(()) => {
                self.metrics.record_submitted();
                Ok(Submission::Queued)
            }
            Err(TrySendError::Full(command)) => self.handle_overflow(command),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::QueueClosed),
        }
    }

    /// Enqueue a flush marker and return the channel its acknowledgement arrives on
    ///
    /// Always waits for queue space, whatever the overflow policy.
    pub fn send_flush(&self) -> Result<Receiver<()>> {
        let (ack_tx, ack_rx) = bounded(1);
        self.sender
            .send(Command::Flush(ack_tx))
            .map_err(|_| LoggerError::QueueClosed)?;
        Ok(ack_rx)
    }

    fn handle_overflow(&self, command: Command) -> Result<Submission> {
        self.metrics.record_queue_full();

        match self.policy {
            OverflowPolicy::Block => {
                self.metrics.record_block();
                self.sender
                    .send(command)
                    .map_err(|_| LoggerError::QueueClosed)?;
                self.metrics.record_submitted();
                Ok(Submission::Queued)
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match self.sender.send_timeout(command, timeout) {
                    Ok(()) => {
                        self.metrics.record_submitted();
                        Ok(Submission::Queued)
                    }
                    Err(SendTimeoutError::Timeout(_)) => {
                        self.alert_and_drop();
                        Ok(Submission::Dropped)
                    }
                    Err(SendTimeoutError::Disconnected(_)) => Err(LoggerError::QueueClosed),
                }
            }

            OverflowPolicy::DropNewest => {
                self.alert_and_drop();
                Ok(Submission::Dropped)
            }
        }
    }

    fn alert_and_drop(&self) {
        let dropped_count = self.metrics.record_dropped() + 1;

        // Alert on first drop and periodically thereafter
        if dropped_count == 1 || dropped_count % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Queue full ({} slots), {} logs dropped under {} policy.",
                self.capacity, dropped_count, self.policy
            );

            if let Some(ref callback) = self.on_overflow {
                callback(dropped_count);
            }
        }
    }

    /// Number of commands currently buffered
    pub fn len(&self) -> usize {
        self.sender.len()
    }
}

impl QueueReceiver {
    /// Block until a command arrives; `None` once the queue is closed and drained
    pub fn recv(&self) -> Option<Command> {
        self.receiver.recv().ok()
    }

    /// Take a buffered command without blocking
    pub fn try_recv(&self) -> Option<Command> {
        self.receiver.try_recv().ok()
    }
}
