//! Conversation observer port
//!
//! Callbacks through which the presentation layer follows a conversation.
//! All methods have no-op defaults.

use super::transcript_exporter::{ExportError, ExportReceipt};
use livechat_domain::{ConversationPhase, DomainError, TranscriptEntry};

pub trait ConversationObserver: Send + Sync {
    /// The conversation moved to a new phase.
    fn on_phase_changed(&self, _phase: ConversationPhase) {}

    /// A line was appended to the transcript.
    fn on_transcript_entry(&self, _entry: &TranscriptEntry) {}

    /// The evaluation arrived; the conversation is over.
    fn on_evaluation(&self, _evaluation: &str) {}

    /// A user action was not accepted in the current phase.
    fn on_rejected(&self, _error: &DomainError) {}

    /// The transcript was handed to the exporter.
    fn on_exported(&self, _receipt: &ExportReceipt) {}

    fn on_export_failed(&self, _error: &ExportError) {}
}

/// No-op implementation for tests and headless runs.
pub struct NoConversationObserver;

impl ConversationObserver for NoConversationObserver {}
