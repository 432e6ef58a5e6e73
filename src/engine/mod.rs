// src/engine/mod.rs

//! Watch/restart engine.
//!
//! This module ties together:
//! - directory discovery and the growing watch set
//! - classification of change events
//! - the `App` lifecycle (compile, start, restart, shutdown)
//! - the stop signal used for graceful cancellation
//!
//! The loop itself lives in [`watcher`].

/// Lifecycle of a [`Watcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    Watching,
    ShuttingDown,
    Stopped,
}

/// Clean ways for [`Watcher::run`] to finish. Everything else is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A [`StopHandle`] was used.
    StopRequested,
}

pub mod stop;
pub mod watch_set;
pub mod watcher;

pub use stop::StopHandle;
pub use watch_set::WatchSet;
pub use watcher::Watcher;
