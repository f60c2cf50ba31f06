//! HTML transcript export.
//!
//! Writes each concluded conversation to its own file named after the export
//! time, e.g. `conversation-20240101-120000.html`.

use chrono::{DateTime, Local};
use livechat_application::ports::transcript_exporter::{
    ExportError, ExportReceipt, TranscriptExporter,
};
use livechat_domain::ConversationDocument;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct HtmlTranscriptExporter {
    dir: PathBuf,
}

impl HtmlTranscriptExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for an export made at `at`. A numeric suffix is added when
    /// the name is already taken.
    fn target_path(&self, at: DateTime<Local>) -> PathBuf {
        let stem = format!("conversation-{}", at.format("%Y%m%d-%H%M%S"));
        let mut path = self.dir.join(format!("{}.html", stem));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{}-{}.html", stem, n));
            n += 1;
        }
        path
    }
}

impl TranscriptExporter for HtmlTranscriptExporter {
    fn export(&self, document: &ConversationDocument) -> Result<ExportReceipt, ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.target_path(Local::now());
        std::fs::write(&path, document.to_html())?;
        debug!("Wrote {} entries to {}", document.entries.len(), path.display());
        Ok(ExportReceipt {
            location: path.display().to_string(),
        })
    }
}
