//! Logging infrastructure: JSONL dumps of the protocol log.
//!
//! Provides [`JsonlLogSink`], a JSONL file writer that implements the
//! [`LogWriter`](livechat_application::LogWriter) port, and
//! [`read_log_file`] to load a dump back.

mod jsonl_logger;

pub use jsonl_logger::{JsonlLogSink, LogStoreError, read_log_file};
