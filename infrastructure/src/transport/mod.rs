//! Live transport adapters.

mod replay;

pub use replay::{ReplayScriptError, ReplayStep, ReplayTransport, parse_script};
