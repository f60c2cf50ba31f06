//! Log records and the read-only projections over a record sequence.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::message::LogMessage;

/// Direction encoded in a record's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Send,
    Receive,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Send => "send",
            Direction::Receive => "receive",
        }
    }
}

/// One timestamped entry in the protocol log.
///
/// Records are immutable once appended to a store. The repetition `count`
/// is only ever set by [`coalesce`], which builds new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Dotted `source.direction` tag, e.g. `client.send` or `server.content`.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: LogMessage,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(kind: impl Into<String>, message: impl Into<LogMessage>) -> Self {
        Self::at(kind, message, Utc::now())
    }

    pub fn at(kind: impl Into<String>, message: impl Into<LogMessage>, date: DateTime<Utc>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            date,
            count: None,
        }
    }

    /// Tag prefix before the first `.` (the whole tag if there is none).
    pub fn source(&self) -> &str {
        self.kind
            .split_once('.')
            .map(|(source, _)| source)
            .unwrap_or(&self.kind)
    }

    pub fn direction(&self) -> Option<Direction> {
        if self.kind.contains("receive") {
            Some(Direction::Receive)
        } else if self.kind.contains("send") {
            Some(Direction::Send)
        } else {
            None
        }
    }

    /// Wall-clock time as `HH:MM:SS` in the given zone.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.date.with_timezone(tz).format("%H:%M:%S").to_string()
    }

    fn repeats(&self, other: &LogRecord) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

/// Collapse runs of identical consecutive records.
///
/// A run of `n > 1` equal records (same type tag and message) becomes a
/// single record with `count = n`, stamped with the date of the newest
/// record in the run. The input is left untouched.
pub fn coalesce<'a, I>(records: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let mut out: Vec<LogRecord> = Vec::new();
    for record in records {
        match out.last_mut() {
            Some(last) if last.repeats(record) => {
                last.count = Some(last.count.unwrap_or(1) + 1);
                last.date = record.date;
            }
            _ => out.push(record.clone()),
        }
    }
    out
}
