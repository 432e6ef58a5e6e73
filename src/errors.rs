// src/errors.rs

//! Crate-wide error type and result alias.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GowatchError {
    /// The build tool ran but exited unsuccessfully.
    ///
    /// This is the only error the watch loop recovers from.
    #[error("error to compile program (exit code {code:?}):\n{output}")]
    Compile { code: Option<i32>, output: String },

    #[error("failed to run build tool '{program}': {source}")]
    BuildTool { program: String, source: io::Error },

    #[error("failed to launch {binary:?}: {source}")]
    Launch { binary: PathBuf, source: io::Error },

    #[error("failed to terminate process (pid {pid:?}): {source}")]
    Terminate { pid: Option<u32>, source: io::Error },

    #[error("failed to watch directory {path:?}: {source}")]
    Subscribe { path: PathBuf, source: notify::Error },

    #[error("failed to walk directory tree at {path:?}: {source}")]
    Traversal { path: PathBuf, source: io::Error },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("watch resource not initialised (never created or already released)")]
    EngineNotInitialized,

    #[error("watcher has already been started")]
    AlreadyStarted,

    #[error("file watch error: {0}")]
    Watch(#[source] notify::Error),

    #[error("file watch event stream closed")]
    WatchStreamClosed,

    #[error("{cause}; shutdown also failed: {shutdown}")]
    Shutdown {
        cause: Box<GowatchError>,
        shutdown: Box<GowatchError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GowatchError {
    /// True for build failures the watch loop keeps running through.
    pub fn is_compile_error(&self) -> bool {
        matches!(self, GowatchError::Compile { .. })
    }
}

pub type Result<T> = std::result::Result<T, GowatchError>;
