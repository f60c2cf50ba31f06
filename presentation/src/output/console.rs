//! Console output for protocol log entries

use super::highlight::{TokenKind, tokenize};
use colored::{ColoredString, Colorize};
use livechat_domain::{Block, Direction, LogEntryView, format_ids};

/// Formats log entries for console display
pub struct ConsoleLogFormatter;

impl ConsoleLogFormatter {
    /// Format a list of entries, one block per entry
    pub fn format_entries(entries: &[LogEntryView]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "(no log entries)".dimmed());
        }

        let mut output = String::new();
        for entry in entries {
            output.push_str(&Self::format_entry(entry));
            output.push('\n');
        }
        output
    }

    /// Format a single entry: a metadata line, then its rendered blocks
    pub fn format_entry(entry: &LogEntryView) -> String {
        let mut output = Self::header(entry);
        output.push('\n');

        for block in &entry.rendered.blocks {
            Self::push_block(&mut output, block);
        }
        output
    }

    fn header(entry: &LogEntryView) -> String {
        let mut header = format!(
            "{} {} {}",
            entry.time.dimmed(),
            entry.source.bold(),
            entry.kind.cyan()
        );

        match entry.direction {
            Some(Direction::Send) => header.push_str(&format!(" {}", "send".yellow())),
            Some(Direction::Receive) => header.push_str(&format!(" {}", "receive".blue())),
            None => {}
        }

        if let Some(count) = entry.count {
            header.push_str(&format!(" {}", format!("x{}", count).magenta().bold()));
        }

        header
    }

    fn paint(kind: TokenKind, token: &str) -> ColoredString {
        match kind {
            TokenKind::Keyword => token.magenta().bold(),
            TokenKind::String => token.green(),
            TokenKind::Key => token.blue(),
            TokenKind::Number => token.yellow(),
            TokenKind::Literal => token.cyan(),
            TokenKind::Comment => token.dimmed().italic(),
            TokenKind::Punct => token.white(),
            TokenKind::Plain => token.bright_white(),
        }
    }

    fn push_block(output: &mut String, block: &Block) {
        match block {
            Block::Role(role) => {
                output.push_str(&format!("  {}\n", format!("{}:", role).green().bold()));
            }
            Block::Heading(heading) => {
                output.push_str(&format!("  {}\n", heading.yellow().bold()));
            }
            Block::Text(text) => {
                for line in text.lines() {
                    output.push_str(&format!("  {}\n", line));
                }
            }
            Block::Code { language, body } => {
                output.push_str(&format!("  {}\n", format!("```{}", language).dimmed()));
                for line in body.lines() {
                    output.push_str("  ");
                    for (kind, token) in tokenize(language, line) {
                        output.push_str(&Self::paint(kind, token).to_string());
                    }
                    output.push('\n');
                }
                output.push_str(&format!("  {}\n", "```".dimmed()));
            }
            Block::Preformatted(dump) => {
                for line in dump.lines() {
                    output.push_str(&format!("  {}\n", line.dimmed()));
                }
            }
            Block::Note(note) => {
                output.push_str(&format!("  {}\n", note.italic().dimmed()));
            }
            Block::Ids(ids) => {
                output.push_str(&format!("  {}\n", format_ids(ids).red()));
            }
            Block::Placeholder => output.push('\n'),
        }
    }
}
