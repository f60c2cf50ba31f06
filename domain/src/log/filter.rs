//! Log view filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::message::LogMessage;
use super::record::LogRecord;

/// Which records a log view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFilter {
    /// Tool calls, tool responses and cancellations.
    Tools,
    /// Client content and server content.
    Conversations,
    /// Everything.
    #[default]
    None,
}

impl LogFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFilter::Tools => "tools",
            LogFilter::Conversations => "conversations",
            LogFilter::None => "none",
        }
    }

    /// Predicate over the raw message shape.
    pub fn matches(&self, message: &LogMessage) -> bool {
        if let LogFilter::None = self {
            return true;
        }
        if !matches!(message, LogMessage::Structured(_)) {
            return false;
        }
        match self {
            LogFilter::Tools => {
                message.has_field("toolCall")
                    || message.has_field("functionResponses")
                    || message.has_field("toolCallCancellation")
            }
            LogFilter::Conversations => {
                (message.has_field("turns") && message.has_field("turnComplete"))
                    || message.has_field("serverContent")
            }
            LogFilter::None => true,
        }
    }

    /// Keep the matching records, in order.
    pub fn apply<'a>(&self, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
        records
            .iter()
            .filter(|record| self.matches(&record.message))
            .collect()
    }
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tools" => Ok(LogFilter::Tools),
            "conversations" => Ok(LogFilter::Conversations),
            "none" | "all" => Ok(LogFilter::None),
            other => Err(format!(
                "Unknown log filter '{}' (expected tools, conversations or none)",
                other
            )),
        }
    }
}
