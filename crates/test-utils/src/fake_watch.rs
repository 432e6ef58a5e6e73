use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gowatch::errors::{GowatchError, Result};
use gowatch::watch::WatchResource;

#[derive(Debug, Default)]
struct WatchLogInner {
    added: Vec<PathBuf>,
    closed: usize,
    fail_on: Option<PathBuf>,
    fail_close: bool,
}

/// Shared view of what a [`FakeWatchResource`] was asked to do.
#[derive(Debug, Clone, Default)]
pub struct WatchLog {
    inner: Arc<Mutex<WatchLogInner>>,
}

impl WatchLog {
    pub fn added(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().added.clone()
    }

    pub fn is_watching(&self, dir: &Path) -> bool {
        self.inner.lock().unwrap().added.iter().any(|d| d == dir)
    }

    pub fn close_count(&self) -> usize {
        self.inner.lock().unwrap().closed
    }

    /// Make `add` fail for `dir`.
    pub fn fail_on(&self, dir: impl Into<PathBuf>) {
        self.inner.lock().unwrap().fail_on = Some(dir.into());
    }

    /// Make `close` fail (after recording the call).
    pub fn fail_close(&self) {
        self.inner.lock().unwrap().fail_close = true;
    }
}

/// Watch resource that records subscriptions instead of talking to the OS.
/// Events are injected through `gowatch::watch::watch_channels` senders.
#[derive(Debug, Default)]
pub struct FakeWatchResource {
    log: WatchLog,
}

impl FakeWatchResource {
    pub fn new() -> (Self, WatchLog) {
        let log = WatchLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl WatchResource for FakeWatchResource {
    fn add(&mut self, dir: &Path) -> Result<()> {
        let mut inner = self.log.inner.lock().unwrap();
        if inner.fail_on.as_deref() == Some(dir) {
            return Err(GowatchError::Subscribe {
                path: dir.to_path_buf(),
                source: notify::Error::path_not_found().add_path(dir.to_path_buf()),
            });
        }
        inner.added.push(dir.to_path_buf());
        Ok(())
    }

    fn close(self) -> Result<()> {
        let mut inner = self.log.inner.lock().unwrap();
        inner.closed += 1;
        if inner.fail_close {
            return Err(GowatchError::Watch(notify::Error::generic("close failed")));
        }
        Ok(())
    }
}
