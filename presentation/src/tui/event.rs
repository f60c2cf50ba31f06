//! UI events: conversation callbacks turned into messages for the TUI loop

use livechat_application::{ConversationObserver, ExportError, ExportReceipt};
use livechat_domain::{ConversationPhase, DomainError, TranscriptEntry};
use tokio::sync::mpsc;

/// Something the conversation task wants the screen to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PhaseChanged(ConversationPhase),
    Entry(TranscriptEntry),
    Evaluation(String),
    Flash(String),
}

/// [`ConversationObserver`] that forwards every callback to the TUI loop.
///
/// The observer runs on the conversation task; the TUI loop owns the state.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }

    fn emit(&self, event: UiEvent) {
        // Receiver gone means the TUI is shutting down
        let _ = self.tx.send(event);
    }
}

impl ConversationObserver for ChannelObserver {
    fn on_phase_changed(&self, phase: ConversationPhase) {
        self.emit(UiEvent::PhaseChanged(phase));
    }

    fn on_transcript_entry(&self, entry: &TranscriptEntry) {
        self.emit(UiEvent::Entry(entry.clone()));
    }

    fn on_evaluation(&self, evaluation: &str) {
        self.emit(UiEvent::Evaluation(evaluation.to_string()));
    }

    fn on_rejected(&self, error: &DomainError) {
        self.emit(UiEvent::Flash(error.to_string()));
    }

    fn on_exported(&self, receipt: &ExportReceipt) {
        self.emit(UiEvent::Flash(format!("Exported to {}", receipt.location)));
    }

    fn on_export_failed(&self, error: &ExportError) {
        self.emit(UiEvent::Flash(format!("Export failed: {}", error)));
    }
}
