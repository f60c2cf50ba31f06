//! Transcript widget: conversation lines and the evaluation

use crate::tui::state::ChatState;
use livechat_domain::Speaker;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct TranscriptWidget<'a> {
    state: &'a ChatState,
}

impl<'a> TranscriptWidget<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self { state }
    }

    fn speaker_color(speaker: Speaker) -> Color {
        match speaker {
            Speaker::User => Color::Cyan,
            Speaker::Assistant => Color::Green,
        }
    }

    fn format_transcript(&self) -> Text<'_> {
        let mut lines: Vec<Line> = Vec::new();

        for entry in &self.state.transcript {
            lines.push(Line::from(Span::styled(
                format!("{}: ", entry.speaker.label()),
                Style::default()
                    .fg(Self::speaker_color(entry.speaker))
                    .add_modifier(Modifier::BOLD),
            )));
            for content_line in entry.text.lines() {
                lines.push(Line::from(format!("  {}", content_line)));
            }
            lines.push(Line::from(""));
        }

        if let Some(evaluation) = &self.state.evaluation {
            lines.push(Line::from(Span::styled(
                "Evaluation: ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
            for content_line in evaluation.lines() {
                lines.push(Line::from(format!("  {}", content_line)));
            }
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Waiting for the session...",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Text::from(lines)
    }
}

impl<'a> Widget for TranscriptWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.format_transcript();
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // line_count wraps the same way rendering does
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let total_lines = paragraph.line_count(content_width) as u16;
        let scroll = total_lines.saturating_sub(visible_height);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Conversation ({}) ", self.state.phase))
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livechat_domain::{ConversationPhase, TranscriptEntry};

    fn render(state: &ChatState, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        TranscriptWidget::new(state).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_labels_and_phase() {
        let mut state = ChatState::new();
        state.phase = ConversationPhase::Active;
        state.transcript.push(TranscriptEntry::assistant("Hi! Name?"));
        state.transcript.push(TranscriptEntry::user("Sam"));

        let content = render(&state, 40, 10);
        assert!(content.contains("Conversation (active)"));
        assert!(content.contains("AI:"));
        assert!(content.contains("Hi! Name?"));
        assert!(content.contains("User:"));
        assert!(content.contains("Sam"));
    }

    #[test]
    fn test_shows_evaluation() {
        let mut state = ChatState::new();
        state.phase = ConversationPhase::Concluded;
        state.evaluation = Some("Pleasant chat".into());

        let content = render(&state, 40, 6);
        assert!(content.contains("Evaluation:"));
        assert!(content.contains("Pleasant chat"));
    }

    #[test]
    fn test_keeps_latest_lines_visible() {
        let mut state = ChatState::new();
        for i in 0..20 {
            state.transcript.push(TranscriptEntry::user(format!("line {}", i)));
        }
        let content = render(&state, 30, 6);
        assert!(content.contains("line 19"));
        assert!(!content.contains("line 0 "));
    }

    #[test]
    fn test_placeholder_before_setup() {
        let content = render(&ChatState::new(), 40, 5);
        assert!(content.contains("Waiting for the session"));
    }
}
