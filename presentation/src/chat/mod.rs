//! Interactive chat module
//!
//! Provides a line-editor chat interface for a live conversation.

pub mod command;
mod observer;
mod repl;

pub use command::{ReplInput, parse_line};
pub use observer::ConsoleObserver;
pub use repl::ChatRepl;
