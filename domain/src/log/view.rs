//! Display-ready log entries.

use chrono::TimeZone;

use super::event::classify;
use super::record::{Direction, LogRecord};
use super::render::{RenderedMessage, render};

/// A log record classified and rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntryView {
    /// `HH:MM:SS`
    pub time: String,
    /// Raw type tag.
    pub kind: String,
    pub source: String,
    pub direction: Option<Direction>,
    pub rendered: RenderedMessage,
    pub count: Option<u32>,
}

impl LogEntryView {
    pub fn from_record<Tz: TimeZone>(record: &LogRecord, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            time: record.time_in(tz),
            kind: record.kind.clone(),
            source: record.source().to_string(),
            direction: record.direction(),
            rendered: render(&classify(&record.message)),
            count: record.count,
        }
    }
}
