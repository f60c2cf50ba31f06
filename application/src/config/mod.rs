//! Application-level configuration.
//!
//! - [`ConversationConfig`]: what the conversation sends on its own behalf
//! - [`LogViewConfig`]: how the protocol log is projected for display

use livechat_domain::{LogFilter, ScriptedPrompts, SessionSetup};

/// Configuration for [`ConversationController`](crate::ConversationController).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationConfig {
    pub setup: SessionSetup,
    pub prompts: ScriptedPrompts,
}

/// Configuration for [`LogViewUseCase`](crate::LogViewUseCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogViewConfig {
    pub filter: LogFilter,
    /// Collapse consecutive duplicate records into one entry with a count.
    pub coalesce: bool,
}

impl Default for LogViewConfig {
    fn default() -> Self {
        Self {
            filter: LogFilter::None,
            coalesce: true,
        }
    }
}

impl LogViewConfig {
    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_coalesce(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }
}
