//! Concurrent progress accumulation with periodic and per-report callbacks.

mod optional;
mod reporter;
mod ticker;

pub use optional::Reporter;
pub use reporter::{Progress, ProgressFn};
