//! Key handling: maps key events to actions per screen

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions on the chat screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKey {
    InsertChar(char),
    DeleteChar,
    Submit,
    CycleFilter,
    LogUp,
    LogDown,
    Quit,
    None,
}

/// Actions in the log viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    CycleFilter,
    ToggleCoalesce,
    Quit,
    None,
}

/// Key event handler
pub struct KeyHandler;

impl KeyHandler {
    /// Chat screen: printable keys edit the input line
    pub fn chat(key: KeyEvent) -> ChatKey {
        if key.kind != KeyEventKind::Press {
            return ChatKey::None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => ChatKey::Quit,
            (KeyCode::Enter, _) => ChatKey::Submit,
            (KeyCode::Backspace, _) => ChatKey::DeleteChar,
            (KeyCode::Tab, _) => ChatKey::CycleFilter,
            (KeyCode::PageUp, _) => ChatKey::LogUp,
            (KeyCode::PageDown, _) => ChatKey::LogDown,
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => ChatKey::InsertChar(c),
            _ => ChatKey::None,
        }
    }

    /// Log viewer: single-key commands
    pub fn viewer(key: KeyEvent) -> ViewerKey {
        if key.kind != KeyEventKind::Press {
            return ViewerKey::None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => ViewerKey::Quit,
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => ViewerKey::Quit,
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => ViewerKey::ScrollUp,
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => ViewerKey::ScrollDown,
            (KeyCode::PageUp, _) => ViewerKey::PageUp,
            (KeyCode::PageDown, _) => ViewerKey::PageDown,
            (KeyCode::Char('f'), _) | (KeyCode::Tab, _) => ViewerKey::CycleFilter,
            (KeyCode::Char('c'), _) => ViewerKey::ToggleCoalesce,
            _ => ViewerKey::None,
        }
    }
}
