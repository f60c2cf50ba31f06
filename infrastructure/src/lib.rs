//! Infrastructure layer for livechat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod log_store;
pub mod logging;
pub mod transport;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExportConfig, FileLoggerConfig,
};
pub use export::HtmlTranscriptExporter;
pub use log_store::InMemoryLogStore;
pub use logging::{JsonlLogSink, LogStoreError, read_log_file};
pub use transport::{ReplayScriptError, ReplayStep, ReplayTransport, parse_script};
