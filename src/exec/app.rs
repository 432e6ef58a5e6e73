// src/exec/app.rs

//! Pluggable build-and-run abstraction.
//!
//! The engine talks to an `App` instead of spawning processes itself. This
//! makes it easy to swap in a fake in tests while keeping the production
//! implementation in [`super::runner`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Boxed future returned by [`App`] methods.
pub type AppFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Token identifying one launched instance of the program.
///
/// The OS process itself stays owned by the `App`; the engine only holds
/// this token so it can say which instance it expects to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    /// Increments on every successful start.
    pub generation: u64,
    pub pid: Option<u32>,
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "#{} (pid {pid})", self.generation),
            None => write!(f, "#{}", self.generation),
        }
    }
}

/// Build-and-run lifecycle of the watched program.
///
/// Implementations must never have more than one live child at a time.
pub trait App: Send {
    /// Rebuild the program. Fails with `GowatchError::Compile` when the build
    /// tool exits unsuccessfully.
    fn compile(&mut self) -> AppFuture<'_, ()>;

    /// Launch the last compiled binary.
    fn start(&mut self) -> AppFuture<'_, ProcessHandle>;

    /// Terminate the running instance (if alive), rebuild and relaunch.
    ///
    /// On a compile failure the old instance stays terminated and no new one
    /// is started.
    fn restart(&mut self, previous: Option<ProcessHandle>) -> AppFuture<'_, ProcessHandle>;

    /// Terminate the running instance, if any. Idempotent.
    fn shutdown(&mut self) -> AppFuture<'_, ()>;
}
