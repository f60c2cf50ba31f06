//! Conversation entities and value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::log::part::Part;

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used in transcripts and exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "AI",
        }
    }
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Lifecycle of a conversation.
///
/// ```text
/// Setup ──ready──▶ Active ──end──▶ AwaitingEvaluation ──reply──▶ Concluded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationPhase {
    #[default]
    Setup,
    Active,
    AwaitingEvaluation,
    Concluded,
}

impl ConversationPhase {
    pub fn accepts_input(&self) -> bool {
        matches!(self, ConversationPhase::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationPhase::Concluded)
    }
}

impl fmt::Display for ConversationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationPhase::Setup => "setup",
            ConversationPhase::Active => "active",
            ConversationPhase::AwaitingEvaluation => "awaiting evaluation",
            ConversationPhase::Concluded => "concluded",
        };
        f.write_str(s)
    }
}

/// Identifier of an outbound prompt, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// What an outbound prompt was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Greeting,
    UserTurn,
    Evaluation,
}

/// A prompt the session wants sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub id: RequestId,
    pub kind: PromptKind,
    pub text: String,
}

/// A complete model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    /// The prompt this reply answers, when the transport can tell.
    pub in_reply_to: Option<RequestId>,
    pub parts: Vec<Part>,
}

impl ModelReply {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            in_reply_to: None,
            parts,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Part::Text(text.into())])
    }

    pub fn in_reply_to(mut self, id: RequestId) -> Self {
        self.in_reply_to = Some(id);
        self
    }

    /// Text fragments joined in order, trimmed.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// Why a reply did not change the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Nothing left after trimming.
    Empty,
    /// No prompt has been sent yet.
    NotStarted,
    /// The conversation already has its evaluation.
    Concluded,
    /// The reply names a request that is not pending: never issued, or
    /// already complete.
    UnknownRequest(RequestId),
}

/// Effect of a reply on the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Appended(TranscriptEntry),
    Evaluated(String),
    Dropped(DropReason),
}
