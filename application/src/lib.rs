//! Application layer for livechat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConversationConfig, LogViewConfig};
pub use ports::{
    conversation_observer::{ConversationObserver, NoConversationObserver},
    live_transport::{LiveTransport, TransportError, TransportEvent, TransportEvents},
    log_store::{FanoutLogWriter, LogReader, LogWriter, NoLogWriter},
    transcript_exporter::{ExportError, ExportReceipt, TranscriptExporter},
};
pub use use_cases::conversation::{ConversationController, ConversationError, UserAction};
pub use use_cases::log_view::{LogViewUseCase, project};
