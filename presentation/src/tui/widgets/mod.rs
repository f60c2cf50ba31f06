//! TUI widgets: ratatui components for the chat and log screens
//!
//! Chat layout:
//! ┌── Conversation (60%) ──┬── Log (40%) ──────────┐
//! ├── Input (3) ───────────┴───────────────────────┤
//! └── StatusBar (1) ───────────────────────────────┘

pub mod input;
pub mod log_list;
pub mod status_bar;
pub mod transcript;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the chat screen
pub struct ChatLayout {
    pub transcript: Rect,
    pub log: Rect,
    pub input: Rect,
    pub status_bar: Rect,
}

impl ChatLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);

        Self {
            transcript: columns[0],
            log: columns[1],
            input: rows[1],
            status_bar: rows[2],
        }
    }
}

/// Regions of the log viewer screen
pub struct LogLayout {
    pub log: Rect,
    pub status_bar: Rect,
}

impl LogLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        Self {
            log: rows[0],
            status_bar: rows[1],
        }
    }
}
