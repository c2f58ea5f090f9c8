//! Cache Module
//!
//! The instrumented cache: opaque-key storage with call counting,
//! call-history recording, and history replay.

mod cache;
pub mod decode;
mod instrument;
mod replay;


// Re-export public types
pub use cache::Cache;
pub use instrument::{inputs_key, outputs_key, render_args, CallCounter, CallHistory, Instrumented};
pub use replay::{replay, ReplayReporter};
