//! TUI state: everything the widgets draw from

use super::event::UiEvent;
use livechat_domain::{ConversationPhase, LogEntryView, LogFilter, TranscriptEntry};

/// Next filter in the `none → conversations → tools` cycle.
pub fn next_filter(filter: LogFilter) -> LogFilter {
    match filter {
        LogFilter::None => LogFilter::Conversations,
        LogFilter::Conversations => LogFilter::Tools,
        LogFilter::Tools => LogFilter::None,
    }
}

/// Scrollable list of rendered log entries.
///
/// `scroll` counts lines up from the bottom; 0 follows new entries.
#[derive(Debug, Clone, Default)]
pub struct LogPane {
    pub entries: Vec<LogEntryView>,
    pub filter: LogFilter,
    pub coalesce: bool,
    pub scroll: usize,
}

impl LogPane {
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}

/// State of the chat screen.
#[derive(Debug, Default)]
pub struct ChatState {
    pub phase: ConversationPhase,
    pub transcript: Vec<TranscriptEntry>,
    pub evaluation: Option<String>,
    pub input: String,
    pub log: LogPane,
    pub flash: Option<String>,
    pub should_quit: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::PhaseChanged(phase) => {
                self.phase = phase;
                self.flash = match phase {
                    ConversationPhase::Concluded => {
                        Some("Conversation concluded. /export saves the transcript.".into())
                    }
                    _ => None,
                };
            }
            UiEvent::Entry(entry) => self.transcript.push(entry),
            UiEvent::Evaluation(evaluation) => self.evaluation = Some(evaluation),
            UiEvent::Flash(message) => self.flash = Some(message),
        }
    }

    /// Take the typed line, leaving the input empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}
