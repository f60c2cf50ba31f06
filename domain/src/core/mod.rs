//! Core shared types.

pub mod error;
