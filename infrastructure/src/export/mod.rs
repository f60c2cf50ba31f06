//! Transcript exporters.

mod html;

pub use html::HtmlTranscriptExporter;
