//! Full-screen terminal interfaces (ratatui + crossterm)
//!
//! - [`ChatTui`]: conversation, live protocol log and input on one screen
//! - [`LogViewer`]: browse a protocol log

mod app;
pub mod event;
pub mod keys;
mod log_viewer;
pub mod state;
mod terminal;
pub mod widgets;

pub use app::{ChatTui, TuiError};
pub use log_viewer::LogViewer;
