//! Conversation domain.
//!
//! - [`session::ConversationSession`]: the turn-taking state machine
//! - [`entities`]: transcript entries, phases, request ids, replies
//! - [`document::ConversationDocument`]: the exported transcript

pub mod document;
pub mod entities;
pub mod prompts;
pub mod session;
