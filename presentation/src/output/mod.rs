//! Console output formatting

pub mod console;
pub mod highlight;
