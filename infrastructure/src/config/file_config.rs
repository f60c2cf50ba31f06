//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [session]
//! model = "models/gemini-2.0-flash-exp"
//! system_instruction = "You are a friendly companion..."
//!
//! [prompts]
//! greeting = "Please greet the user..."
//! evaluation = "Please provide a brief evaluation..."
//!
//! [logger]
//! filter = "conversations"
//! coalesce = true
//! dump_path = "session.log.jsonl"
//!
//! [export]
//! dir = "transcripts"
//! ```

use livechat_application::{ConversationConfig, LogViewConfig};
use livechat_domain::{LogFilter, ScriptedPrompts, SessionSetup};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("{0} prompt cannot be empty")]
    EmptyPrompt(&'static str),
}

/// Raw logger configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggerConfig {
    /// Default filter of the log view
    pub filter: LogFilter,
    /// Collapse consecutive duplicate records
    pub coalesce: bool,
    /// Mirror the protocol log to this JSONL file
    pub dump_path: Option<String>,
}

impl Default for FileLoggerConfig {
    fn default() -> Self {
        Self {
            filter: LogFilter::None,
            coalesce: true,
            dump_path: None,
        }
    }
}

/// Raw export configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    /// Directory for exported transcripts (defaults to the data directory)
    pub dir: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub session: SessionSetup,
    pub prompts: ScriptedPrompts,
    pub logger: FileLoggerConfig,
    pub export: FileExportConfig,
}

impl FileConfig {
    /// Validate values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.session.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.prompts.greeting.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPrompt("greeting"));
        }
        if self.prompts.evaluation.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPrompt("evaluation"));
        }
        Ok(())
    }

    pub fn conversation_config(&self) -> ConversationConfig {
        ConversationConfig {
            setup: self.session.clone(),
            prompts: self.prompts.clone(),
        }
    }

    pub fn log_view_config(&self) -> LogViewConfig {
        LogViewConfig::default()
            .with_filter(self.logger.filter)
            .with_coalesce(self.logger.coalesce)
    }

    /// Export directory: configured value, else `<data dir>/livechat/transcripts`,
    /// else the current directory.
    pub fn export_dir(&self) -> PathBuf {
        match &self.export.dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("livechat").join("transcripts"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
