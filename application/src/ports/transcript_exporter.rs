//! Transcript export port
//!
//! The host's print/export facility for a concluded conversation.

use livechat_domain::ConversationDocument;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export unavailable: {0}")]
    Unavailable(String),
}

/// Where an exported document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub location: String,
}

pub trait TranscriptExporter: Send + Sync {
    fn export(&self, document: &ConversationDocument) -> Result<ExportReceipt, ExportError>;
}
