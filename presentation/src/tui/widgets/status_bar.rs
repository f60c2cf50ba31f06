//! Status bar widget: phase indicator + key hints or flash message

use livechat_domain::ConversationPhase;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    label: &'a str,
    color: Color,
    message: &'a str,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(label: &'a str, color: Color, message: &'a str) -> Self {
        Self {
            label,
            color,
            message,
        }
    }

    /// Status bar of the chat screen.
    pub fn for_phase(phase: ConversationPhase, flash: Option<&'a str>) -> Self {
        let (label, color) = match phase {
            ConversationPhase::Setup => ("SETUP", Color::DarkGray),
            ConversationPhase::Active => ("ACTIVE", Color::Green),
            ConversationPhase::AwaitingEvaluation => ("EVALUATING", Color::Yellow),
            ConversationPhase::Concluded => ("CONCLUDED", Color::Magenta),
        };
        let hints = "Enter:send  /end  /export  Tab:filter  PgUp/PgDn:log  Esc:quit";
        Self::new(label, color, flash.unwrap_or(hints))
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let label_style = Style::default()
            .fg(Color::Black)
            .bg(self.color)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.label), label_style),
            Span::styled(format!(" {}", self.message), bg_style),
        ]);
        line.render(area, buf);
    }
}
