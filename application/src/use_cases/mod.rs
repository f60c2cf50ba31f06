//! Use cases (application services)

pub mod conversation;
pub mod log_view;
