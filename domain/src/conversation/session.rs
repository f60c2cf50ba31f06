//! The conversation state machine.
//!
//! [`ConversationSession`] holds the transcript and decides what to send and
//! how to attribute replies. It performs no I/O: every operation returns the
//! prompt to send (if any) and the caller hands it to a transport.
//!
//! # Reply attribution
//!
//! Every outbound prompt gets a [`RequestId`] that is remembered together
//! with its [`PromptKind`]. A reply that names its request is attributed by
//! that record, so a late answer to a user turn still lands in the transcript
//! while the evaluation is pending. A reply without a request id is
//! attributed by phase: while awaiting the evaluation it is the evaluation,
//! otherwise it is a transcript line.
//!
//! A request stays pending, and keeps accepting streamed chunks, until the
//! transport reports its turn complete. Replies that name a completed
//! request are dropped.

use std::collections::HashMap;
use tracing::debug;

use super::document::ConversationDocument;
use super::entities::{
    ConversationPhase, DropReason, ModelReply, Outbound, PromptKind, ReplyOutcome, RequestId,
    TranscriptEntry,
};
use super::prompts::ScriptedPrompts;
use crate::core::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    phase: ConversationPhase,
    transcript: Vec<TranscriptEntry>,
    evaluation: Option<String>,
    prompts: ScriptedPrompts,
    next_request: u64,
    pending: HashMap<RequestId, PromptKind>,
}

impl ConversationSession {
    pub fn new(prompts: ScriptedPrompts) -> Self {
        Self {
            prompts,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn evaluation(&self) -> Option<&str> {
        self.evaluation.as_deref()
    }

    /// Whether `id` is an outstanding request of this session.
    pub fn is_pending(&self, id: RequestId) -> bool {
        self.pending.contains_key(&id)
    }

    /// The transport is ready: start the conversation with the greeting prompt.
    pub fn on_setup_complete(&mut self) -> Result<Outbound, DomainError> {
        self.require(ConversationPhase::Setup, "start")?;
        self.phase = ConversationPhase::Active;
        let text = self.prompts.greeting.clone();
        Ok(self.issue(PromptKind::Greeting, text))
    }

    /// Submit user text. Blank input is rejected before any state check
    /// so it never produces a send.
    pub fn submit(&mut self, input: &str) -> Result<Outbound, DomainError> {
        if input.trim().is_empty() {
            return Err(DomainError::BlankInput);
        }
        self.require(ConversationPhase::Active, "send input")?;
        self.transcript.push(TranscriptEntry::user(input));
        Ok(self.issue(PromptKind::UserTurn, input.to_string()))
    }

    /// End the conversation and ask the model for an evaluation.
    pub fn end(&mut self) -> Result<Outbound, DomainError> {
        self.require(ConversationPhase::Active, "end the conversation")?;
        self.phase = ConversationPhase::AwaitingEvaluation;
        let text = self.prompts.evaluation.clone();
        Ok(self.issue(PromptKind::Evaluation, text))
    }

    /// Apply a complete model reply.
    pub fn on_reply(&mut self, reply: &ModelReply) -> ReplyOutcome {
        match self.phase {
            ConversationPhase::Setup => return ReplyOutcome::Dropped(DropReason::NotStarted),
            ConversationPhase::Concluded => return ReplyOutcome::Dropped(DropReason::Concluded),
            ConversationPhase::Active | ConversationPhase::AwaitingEvaluation => {}
        }

        let kind = match reply.in_reply_to {
            Some(id) => match self.pending.get(&id) {
                Some(kind) => *kind,
                None => return ReplyOutcome::Dropped(DropReason::UnknownRequest(id)),
            },
            None if self.phase == ConversationPhase::AwaitingEvaluation => PromptKind::Evaluation,
            None => PromptKind::UserTurn,
        };

        let text = reply.text();
        if text.is_empty() {
            // An empty evaluation leaves the session waiting for another reply.
            debug!(?kind, "dropping empty reply");
            return ReplyOutcome::Dropped(DropReason::Empty);
        }

        match kind {
            PromptKind::Evaluation => {
                self.evaluation = Some(text.clone());
                self.phase = ConversationPhase::Concluded;
                self.pending.clear();
                ReplyOutcome::Evaluated(text)
            }
            PromptKind::Greeting | PromptKind::UserTurn => {
                let entry = TranscriptEntry::assistant(text);
                self.transcript.push(entry.clone());
                ReplyOutcome::Appended(entry)
            }
        }
    }

    /// The model finished its turn for `id`. Returns whether `id` was pending.
    pub fn on_turn_complete(&mut self, id: RequestId) -> bool {
        let completed = self.pending.remove(&id);
        if let Some(kind) = completed {
            debug!(%id, ?kind, "turn complete");
        }
        completed.is_some()
    }

    /// Build the printable document. Only available once concluded.
    pub fn document(&self) -> Result<ConversationDocument, DomainError> {
        match (&self.phase, &self.evaluation) {
            (ConversationPhase::Concluded, Some(evaluation)) => Ok(ConversationDocument::new(
                self.transcript.clone(),
                evaluation.clone(),
            )),
            _ => Err(DomainError::NotConcluded),
        }
    }

    fn require(&self, phase: ConversationPhase, action: &'static str) -> Result<(), DomainError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(DomainError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn issue(&mut self, kind: PromptKind, text: String) -> Outbound {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.pending.insert(id, kind);
        Outbound { id, kind, text }
    }
}
