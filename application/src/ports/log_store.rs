//! Ports for the protocol log.
//!
//! The log is an append-only sequence of [`LogRecord`]s. Writing and reading
//! are split into two traits so that views can be handed a [`LogReader`]
//! and have no way to modify the sequence.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! diagnostic messages about this program, while the protocol log captures
//! the traffic exchanged with the remote API.

use livechat_domain::LogRecord;
use std::sync::Arc;
use tokio::sync::watch;

/// Append side of the protocol log.
///
/// `append` is intentionally synchronous and non-fallible to avoid
/// disrupting the transport. Sinks that can fail log and drop.
pub trait LogWriter: Send + Sync {
    /// Append a record. Records are never modified afterwards.
    fn append(&self, record: LogRecord);
}

/// Read side of the protocol log.
pub trait LogReader: Send + Sync {
    /// All records in append order.
    fn snapshot(&self) -> Vec<LogRecord>;

    /// Number of records appended so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change signal carrying the current record count. Readers re-render
    /// when it changes.
    fn subscribe(&self) -> watch::Receiver<usize>;
}

/// No-op writer for tests and when the log is disabled.
pub struct NoLogWriter;

impl LogWriter for NoLogWriter {
    fn append(&self, _record: LogRecord) {}
}

/// A writer that appends every record to several writers, in order.
///
/// Used to mirror the in-memory store into a dump file.
pub struct FanoutLogWriter {
    delegates: Vec<Arc<dyn LogWriter>>,
}

impl FanoutLogWriter {
    pub fn new(delegates: Vec<Arc<dyn LogWriter>>) -> Self {
        Self { delegates }
    }
}

impl LogWriter for FanoutLogWriter {
    fn append(&self, record: LogRecord) {
        if let Some((last, rest)) = self.delegates.split_last() {
            for d in rest {
                d.append(record.clone());
            }
            last.append(record);
        }
    }
}
