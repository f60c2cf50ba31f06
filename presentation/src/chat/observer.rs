//! Console observer: prints conversation progress as it happens

use colored::Colorize;
use livechat_application::{ConversationObserver, ExportError, ExportReceipt};
use livechat_domain::{ConversationPhase, DomainError, Speaker, TranscriptEntry};

/// Prints model lines, phase changes and export results to stdout.
///
/// User lines are not echoed; the user just typed them.
pub struct ConsoleObserver;

impl ConsoleObserver {
    fn phase_message(phase: ConversationPhase) -> Option<&'static str> {
        match phase {
            ConversationPhase::Setup => None,
            ConversationPhase::Active => Some("Session ready. Type to chat, /end to finish."),
            ConversationPhase::AwaitingEvaluation => Some("Asking for an evaluation..."),
            ConversationPhase::Concluded => {
                Some("Conversation concluded. /export saves the transcript.")
            }
        }
    }
}

impl ConversationObserver for ConsoleObserver {
    fn on_phase_changed(&self, phase: ConversationPhase) {
        if let Some(message) = Self::phase_message(phase) {
            println!("{}", message.dimmed());
        }
    }

    fn on_transcript_entry(&self, entry: &TranscriptEntry) {
        if entry.speaker == Speaker::Assistant {
            println!("{} {}", format!("{}:", entry.speaker.label()).green().bold(), entry.text);
        }
    }

    fn on_evaluation(&self, evaluation: &str) {
        println!();
        println!("{}", "=== Evaluation ===".cyan().bold());
        println!("{}", evaluation);
        println!();
    }

    fn on_rejected(&self, error: &DomainError) {
        println!("{}", error.to_string().yellow());
    }

    fn on_exported(&self, receipt: &ExportReceipt) {
        println!("{} {}", "Exported to".green(), receipt.location);
    }

    fn on_export_failed(&self, error: &ExportError) {
        eprintln!("{} {}", "Export failed:".red().bold(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_visible_phase_has_a_message() {
        assert!(ConsoleObserver::phase_message(ConversationPhase::Setup).is_none());
        for phase in [
            ConversationPhase::Active,
            ConversationPhase::AwaitingEvaluation,
            ConversationPhase::Concluded,
        ] {
            assert!(ConsoleObserver::phase_message(phase).is_some());
        }
    }
}
