//! In-memory protocol log.
//!
//! The single owner of the append-only record sequence. Writers append,
//! views read snapshots and watch the length signal to know when to redraw.

use livechat_application::ports::log_store::{LogReader, LogWriter};
use livechat_domain::LogRecord;
use std::sync::RwLock;
use tokio::sync::watch;
use tracing::warn;

pub struct InMemoryLogStore {
    records: RwLock<Vec<LogRecord>>,
    changed: watch::Sender<usize>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            records: RwLock::new(Vec::new()),
            changed,
        }
    }

    /// Store pre-populated with records, e.g. loaded from a dump file.
    pub fn with_records(records: Vec<LogRecord>) -> Self {
        let (changed, _) = watch::channel(records.len());
        Self {
            records: RwLock::new(records),
            changed,
        }
    }
}

impl Default for InMemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for InMemoryLogStore {
    fn append(&self, record: LogRecord) {
        let len = match self.records.write() {
            Ok(mut records) => {
                records.push(record);
                records.len()
            }
            Err(_) => {
                warn!("Log store lock poisoned, dropping record");
                return;
            }
        };
        self.changed.send_replace(len);
    }
}

impl LogReader for InMemoryLogStore {
    fn snapshot(&self) -> Vec<LogRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    fn subscribe(&self) -> watch::Receiver<usize> {
        self.changed.subscribe()
    }
}
