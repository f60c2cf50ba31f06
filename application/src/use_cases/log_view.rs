//! Log view use case.
//!
//! Projects the protocol log into display entries:
//!
//! ```text
//! LogReader::snapshot ─▶ coalesce (optional) ─▶ LogFilter ─▶ classify + render
//! ```
//!
//! Every step is a read-only projection, so the view can be rebuilt as often
//! as the log changes.

use crate::config::LogViewConfig;
use crate::ports::log_store::LogReader;
use chrono::TimeZone;
use livechat_domain::{LogEntryView, LogFilter, LogRecord, coalesce};
use std::sync::Arc;
use tokio::sync::watch;

pub struct LogViewUseCase {
    reader: Arc<dyn LogReader>,
    config: LogViewConfig,
}

impl LogViewUseCase {
    pub fn new(reader: Arc<dyn LogReader>, config: LogViewConfig) -> Self {
        Self { reader, config }
    }

    pub fn filter(&self) -> LogFilter {
        self.config.filter
    }

    pub fn set_filter(&mut self, filter: LogFilter) {
        self.config.filter = filter;
    }

    pub fn coalesce(&self) -> bool {
        self.config.coalesce
    }

    pub fn set_coalesce(&mut self, coalesce: bool) {
        self.config.coalesce = coalesce;
    }

    /// Change signal of the underlying log.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.reader.subscribe()
    }

    /// Current entries, with times shown in `tz`.
    pub fn entries<Tz: TimeZone>(&self, tz: &Tz) -> Vec<LogEntryView>
    where
        Tz::Offset: std::fmt::Display,
    {
        project(&self.reader.snapshot(), self.config, tz)
    }
}

/// Project a record sequence into display entries.
pub fn project<Tz: TimeZone>(
    records: &[LogRecord],
    config: LogViewConfig,
    tz: &Tz,
) -> Vec<LogEntryView>
where
    Tz::Offset: std::fmt::Display,
{
    let collapsed;
    let records = if config.coalesce {
        collapsed = coalesce(records);
        collapsed.as_slice()
    } else {
        records
    };

    config
        .filter
        .apply(records)
        .into_iter()
        .map(|record| LogEntryView::from_record(record, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use livechat_domain::{LogMessage, PresentationRule};
    use serde_json::json;
    use std::sync::Mutex;

    struct StaticReader {
        records: Mutex<Vec<LogRecord>>,
        tx: watch::Sender<usize>,
    }

    impl StaticReader {
        fn new(records: Vec<LogRecord>) -> Self {
            let (tx, _) = watch::channel(records.len());
            Self {
                records: Mutex::new(records),
                tx,
            }
        }
    }

    impl LogReader for StaticReader {
        fn snapshot(&self) -> Vec<LogRecord> {
            self.records.lock().unwrap().clone()
        }

        fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn subscribe(&self) -> watch::Receiver<usize> {
            self.tx.subscribe()
        }
    }

    fn records() -> Vec<LogRecord> {
        vec![
            LogRecord::new("client.open", LogMessage::text("connected")),
            LogRecord::new(
                "client.send",
                json!({"turns": [{"text": "Hi"}], "turnComplete": true}),
            ),
            LogRecord::new("server.audio", LogMessage::text("buffer (11250)")),
            LogRecord::new("server.audio", LogMessage::text("buffer (11250)")),
            LogRecord::new(
                "server.toolCall",
                json!({"toolCall": {"functionCalls": [{"id": "1", "name": "f"}]}}),
            ),
            LogRecord::new(
                "server.content",
                json!({"serverContent": {"modelTurn": {"parts": [{"text": "Hello"}]}}}),
            ),
        ]
    }

    #[test]
    fn default_view_shows_everything_coalesced() {
        let view = LogViewUseCase::new(
            Arc::new(StaticReader::new(records())),
            LogViewConfig::default(),
        );
        let entries = view.entries(&Utc);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].count, Some(2));
        assert_eq!(entries[1].rendered.rule, PresentationRule::ClientContent);
    }

    #[test]
    fn coalescing_can_be_disabled() {
        let entries = project(
            &records(),
            LogViewConfig::default().with_coalesce(false),
            &Utc,
        );
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.count.is_none()));
    }

    #[test]
    fn tools_filter() {
        let mut view = LogViewUseCase::new(
            Arc::new(StaticReader::new(records())),
            LogViewConfig::default(),
        );
        view.set_filter(LogFilter::Tools);
        let entries = view.entries(&Utc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rendered.rule, PresentationRule::ToolCall);
        assert_eq!(view.filter(), LogFilter::Tools);
    }

    #[test]
    fn toggling_coalesce_changes_the_projection() {
        let mut view = LogViewUseCase::new(
            Arc::new(StaticReader::new(records())),
            LogViewConfig::default(),
        );
        assert!(view.coalesce());
        assert_eq!(view.entries(&Utc).len(), 5);

        view.set_coalesce(false);
        assert_eq!(view.entries(&Utc).len(), 6);
    }

    #[test]
    fn conversations_filter_keeps_order() {
        let entries = project(
            &records(),
            LogViewConfig::default().with_filter(LogFilter::Conversations),
            &Utc,
        );
        let rules: Vec<PresentationRule> = entries.iter().map(|e| e.rendered.rule).collect();
        assert_eq!(
            rules,
            vec![PresentationRule::ClientContent, PresentationRule::ModelTurn]
        );
    }
}
