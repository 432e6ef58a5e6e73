// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`app`] provides the `App` trait the engine drives, and the
//!   `ProcessHandle` token identifying a launched instance.
//! - [`runner`] is the production `AppRunner`, built on
//!   `tokio::process::Command`.

pub mod app;
pub mod runner;

pub use app::{App, AppFuture, ProcessHandle};
pub use runner::{binary_name_for, AppRunner};
