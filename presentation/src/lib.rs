//! Presentation layer for livechat
//!
//! This crate contains CLI definitions, the chat REPL, console log
//! formatting, and full-screen terminal interfaces.

pub mod chat;
pub mod cli;
pub mod output;
pub mod tui;

// Re-export commonly used types
pub use chat::{ChatRepl, ConsoleObserver};
pub use cli::commands::{ChatArgs, Cli, Command, FilterArg, LogsArgs};
pub use output::console::ConsoleLogFormatter;
pub use tui::{ChatTui, LogViewer, TuiError};
