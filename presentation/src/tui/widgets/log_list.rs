//! Log list widget: the protocol log, newest at the bottom

use crate::output::highlight::{TokenKind, tokenize};
use crate::tui::state::LogPane;
use livechat_domain::{Block as LogBlock, Direction, LogEntryView, format_ids};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Lines for one entry: a metadata line, then the rendered blocks indented.
pub fn entry_lines(entry: &LogEntryView) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(entry.time.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(
            entry.source.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(entry.kind.clone(), Style::default().fg(Color::Cyan)),
    ];
    match entry.direction {
        Some(Direction::Send) => {
            header.push(Span::styled(" ▲", Style::default().fg(Color::Yellow)));
        }
        Some(Direction::Receive) => {
            header.push(Span::styled(" ▼", Style::default().fg(Color::Blue)));
        }
        None => {}
    }
    if let Some(count) = entry.count {
        header.push(Span::styled(
            format!(" x{}", count),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(header)];
    for block in &entry.rendered.blocks {
        push_block(&mut lines, block);
    }
    lines
}

fn push_block(lines: &mut Vec<Line<'static>>, block: &LogBlock) {
    let indented = |text: &str, style: Style| Line::from(Span::styled(format!("  {}", text), style));

    match block {
        LogBlock::Role(role) => lines.push(indented(
            role,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        LogBlock::Heading(heading) => lines.push(indented(
            heading,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        LogBlock::Text(text) => {
            lines.extend(text.lines().map(|l| indented(l, Style::default())));
        }
        LogBlock::Code { language, body } => {
            lines.extend(body.lines().map(|l| code_line(language, l)));
        }
        LogBlock::Preformatted(dump) => {
            lines.extend(
                dump.lines()
                    .map(|l| indented(l, Style::default().fg(Color::Gray))),
            );
        }
        LogBlock::Note(note) => lines.push(indented(
            note,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        LogBlock::Ids(ids) => {
            lines.push(indented(&format_ids(ids), Style::default().fg(Color::Red)));
        }
        LogBlock::Placeholder => lines.push(Line::from("")),
    }
}

/// One code line, indented, with each token styled by kind.
fn code_line(language: &str, line: &str) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    spans.extend(
        tokenize(language, line)
            .into_iter()
            .map(|(kind, token)| Span::styled(token.to_string(), token_style(kind))),
    );
    Line::from(spans)
}

fn token_style(kind: TokenKind) -> Style {
    let style = Style::default();
    match kind {
        TokenKind::Keyword => style.fg(Color::Magenta).add_modifier(Modifier::BOLD),
        TokenKind::String => style.fg(Color::Green),
        TokenKind::Key => style.fg(Color::LightBlue),
        TokenKind::Number => style.fg(Color::Yellow),
        TokenKind::Literal => style.fg(Color::Cyan),
        TokenKind::Comment => style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        TokenKind::Punct => style.fg(Color::Gray),
        TokenKind::Plain => style.fg(Color::LightCyan),
    }
}

/// First visible line when `scroll` counts up from the bottom, clamped to
/// what `Paragraph::scroll` can address.
fn scroll_offset(total_lines: usize, visible_height: usize, scroll: usize) -> u16 {
    let max_scroll = total_lines.saturating_sub(visible_height);
    let top = max_scroll - scroll.min(max_scroll);
    u16::try_from(top).unwrap_or(u16::MAX)
}

pub struct LogListWidget<'a> {
    pane: &'a LogPane,
}

impl<'a> LogListWidget<'a> {
    pub fn new(pane: &'a LogPane) -> Self {
        Self { pane }
    }
}

impl<'a> Widget for LogListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = self.pane.entries.iter().flat_map(entry_lines).collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No log entries",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let visible_height = area.height.saturating_sub(2) as usize;
        let top = scroll_offset(lines.len(), visible_height, self.pane.scroll);

        let title = format!(
            " Log [{}{}] ",
            self.pane.filter,
            if self.pane.coalesce { ", coalesced" } else { "" }
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White));

        Paragraph::new(lines)
            .block(block)
            .scroll((top, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use livechat_domain::{LogFilter, LogRecord};
    use serde_json::json;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn pane() -> LogPane {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let records = [
            LogRecord::at(
                "client.send",
                json!({"turns": [{"text": "Hi"}], "turnComplete": true}),
                date,
            ),
            LogRecord::at(
                "server.toolCallCancellation",
                json!({"toolCallCancellation": {"ids": ["x"]}}),
                date,
            ),
        ];
        LogPane {
            entries: records
                .iter()
                .map(|r| LogEntryView::from_record(r, &Utc))
                .collect(),
            filter: LogFilter::None,
            coalesce: true,
            scroll: 0,
        }
    }

    #[test]
    fn test_entry_lines() {
        let lines = entry_lines(&pane().entries[0]);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "10:00:00 client client.send ▲");
        assert_eq!(text[1], "  User");
        assert_eq!(text[2], "  Hi");
    }

    #[test]
    fn test_renders_entries_and_title() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        LogListWidget::new(&pane()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Log [none, coalesced]"));
        assert!(text.contains("client.send"));
        assert!(text.contains(r#"ids: "x""#));
    }

    #[test]
    fn test_follows_bottom_when_too_long() {
        let mut pane = pane();
        for _ in 0..10 {
            pane.entries.push(pane.entries[0].clone());
        }
        pane.entries.push(pane.entries[1].clone());

        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        LogListWidget::new(&pane).render(area, &mut buf);
        assert!(buffer_text(&buf).contains(r#"ids: "x""#));

        pane.scroll = 1000;
        let mut buf = Buffer::empty(area);
        LogListWidget::new(&pane).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(!text.contains(r#"ids: "x""#));
        assert!(text.contains("10:00:00 client"));
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(5, 10, 0), 0);
        assert_eq!(scroll_offset(30, 10, 0), 20);
        assert_eq!(scroll_offset(30, 10, 5), 15);
        assert_eq!(scroll_offset(30, 10, 1000), 0);
        assert_eq!(scroll_offset(70_000, 10, 0), u16::MAX);
        assert_eq!(scroll_offset(70_000, 10, 69_990), 0);
    }

    #[test]
    fn test_code_lines_are_styled_by_language() {
        let line = code_line("python", "return None");
        assert_eq!(line.to_string(), "  return None");
        assert_eq!(line.spans[1].content, "return");
        assert_eq!(line.spans[1].style, token_style(TokenKind::Keyword));
        assert_eq!(line.spans[3].content, "None");
        assert_eq!(line.spans[3].style, token_style(TokenKind::Literal));

        let plain = code_line("text", "return None");
        assert_eq!(plain.spans.len(), 2);
        assert_eq!(plain.spans[1].style, token_style(TokenKind::Plain));
    }

    #[test]
    fn test_empty_list() {
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        LogListWidget::new(&LogPane::default()).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No log entries"));
    }
}
