//! Printable conversation document.

use serde::{Deserialize, Serialize};

use super::entities::TranscriptEntry;

/// Read-only snapshot of a concluded conversation: every transcript line
/// labeled by speaker, then the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDocument {
    pub entries: Vec<TranscriptEntry>,
    pub evaluation: String,
}

impl ConversationDocument {
    pub fn new(entries: Vec<TranscriptEntry>, evaluation: impl Into<String>) -> Self {
        Self {
            entries,
            evaluation: evaluation.into(),
        }
    }

    /// Standalone HTML page suitable for printing.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<html><head><title>Conversation</title></head><body>\n");
        for entry in &self.entries {
            html.push_str(&format!(
                "<p><strong>{}:</strong> {}</p>\n",
                entry.speaker.label(),
                escape_html(&entry.text)
            ));
        }
        html.push_str(&format!(
            "<p><strong>Evaluation:</strong> {}</p>\n",
            escape_html(&self.evaluation)
        ));
        html.push_str("</body></html>\n");
        html
    }

    /// Plain-text rendition, one labeled line per entry.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&format!("{}: {}\n", entry.speaker.label(), entry.text));
        }
        text.push_str(&format!("Evaluation: {}\n", self.evaluation));
        text
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
