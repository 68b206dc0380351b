//! Background parse session with a pollable status object
//!
//! A session runs one full-file pass as a single background unit of work
//! while the caller stays free to poll status or do other work. The pass is
//! the only writer of the shared status cell; every update is an atomic
//! whole-struct write, so readers always see consistent counters.
//!
//! ## Architecture
//!
//! - [`status`] - the parse state machine and the concurrency-safe cell
//! - [`session`] - session start, the blocking pass, cooperative cancellation
//! - [`unload_set`] - the immutable result: tables, stats, diagnostics
//!
//! ## Lifecycle
//!
//! NotStarted -> Running -> exactly one of Ready, Failed, or Cancelled.
//! Configuration problems (unreadable path, unknown type in the filter) are
//! rejected before Running. Tables are exposed only on Ready; a cancelled or
//! failed pass never leaks partial tables.

pub mod session;
pub mod status;
pub mod unload_set;

#[cfg(test)]
pub mod tests;

pub use session::{ParseSession, StatusProbe};
pub use status::{ParseState, ParseStatus};
pub use unload_set::UnloadSet;
