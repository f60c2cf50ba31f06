//! Configuration file loading for livechat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./livechat.toml` or `./.livechat.toml`
//! 3. Global: `~/.config/livechat/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileExportConfig, FileLoggerConfig};
pub use loader::ConfigLoader;
