//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_observer;
pub mod live_transport;
pub mod log_store;
pub mod transcript_exporter;
