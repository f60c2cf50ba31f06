//! Input widget: the line being typed

use crate::tui::state::ChatState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";

pub struct InputWidget<'a> {
    state: &'a ChatState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Commands still work when chat input is closed, so only dim the frame
        let color = if self.state.phase.accepts_input() {
            Color::Green
        } else {
            Color::DarkGray
        };

        // Keep the tail of long input visible
        let inner_width = area.width.saturating_sub(2) as usize;
        let room = inner_width.saturating_sub(PROMPT.len() + 1);
        let chars: Vec<char> = self.state.input.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(room)..].iter().collect();

        let line = Line::from(vec![
            Span::styled(
                PROMPT,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(visible),
            Span::styled("▌", Style::default().fg(color)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Input ")
            .style(Style::default().fg(color));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
