//! Domain layer for livechat
//!
//! This crate contains the core logic for a client of a real-time
//! conversational API. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Protocol log
//!
//! Every message sent to or received from the live API is appended to an
//! ordered log as a [`LogRecord`]. Messages carry no type discriminant, so
//! [`classify`] decides their shape by field presence, in a fixed priority
//! order, producing a [`LogEvent`]. [`render`] turns an event into display
//! blocks; [`LogFilter`] selects which records a view shows.
//!
//! ## Conversation
//!
//! [`ConversationSession`] drives a scripted chat: greeting on setup, free
//! turns, then an evaluation requested when the user ends the chat.

pub mod conversation;
pub mod core;
pub mod log;

// Re-export commonly used types
pub use conversation::{
    document::ConversationDocument,
    entities::{
        ConversationPhase, DropReason, ModelReply, Outbound, PromptKind, ReplyOutcome, RequestId,
        Speaker, TranscriptEntry,
    },
    prompts::{ScriptedPrompts, SessionSetup},
    session::ConversationSession,
};
pub use crate::core::error::DomainError;
pub use log::{
    event::{FunctionCall, FunctionResponse, LogEvent, PresentationRule, classify},
    filter::LogFilter,
    message::LogMessage,
    part::Part,
    record::{Direction, LogRecord, coalesce},
    render::{Block, RenderedMessage, format_ids, render},
    view::LogEntryView,
};
