//! Domain error types

use crate::conversation::entities::ConversationPhase;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Input is blank")]
    BlankInput,

    #[error("Cannot {action} while the conversation is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: ConversationPhase,
    },

    #[error("Conversation has not concluded yet")]
    NotConcluded,
}

impl DomainError {
    /// Check if this error only means "nothing to do"
    pub fn is_ignorable(&self) -> bool {
        matches!(self, DomainError::BlankInput)
    }
}
