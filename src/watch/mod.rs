// src/watch/mod.rs

//! File watching and change classification.
//!
//! This module is responsible for:
//! - Compiling ignore glob patterns ([`filter`]).
//! - Discovering every directory under a root ([`discover`]).
//! - Turning raw `notify` events into [`ChangeEvent`]s ([`event`]).
//! - Owning the OS subscription itself ([`resource`]).
//!
//! It does **not** decide what to do with a change; that is the engine's job.

pub mod discover;
pub mod event;
pub mod filter;
pub mod resource;

pub use discover::discover_directories;
pub use event::{is_tracked_source, ChangeEvent, ChangeKind};
pub use filter::PathFilter;
pub use resource::{
    watch_channels, NotifyWatchResource, WatchResource, WatchSenders, WatchStreams,
};
