//! Protocol log domain.
//!
//! - [`record::LogRecord`]: one timestamped entry of the append-only log
//! - [`event::classify`]: structural, first-match classification into [`event::LogEvent`]
//! - [`render::render`]: presentation of a classified event as blocks
//! - [`filter::LogFilter`]: view filters (tools / conversations / none)

pub mod event;
pub mod filter;
pub mod message;
pub mod part;
pub mod record;
pub mod render;
pub mod view;
