// src/watch/resource.rs

//! The OS watch subscription the engine owns.
//!
//! The engine only needs to add directories and release the subscription;
//! events and errors arrive over the channels in [`WatchStreams`]. Tests
//! substitute their own [`WatchResource`] and feed the channels directly.

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::errors::{GowatchError, Result};
use crate::watch::event::ChangeEvent;

/// A subscription for change notifications on a set of directories.
pub trait WatchResource: Send {
    /// Start watching `dir` (non-recursively).
    fn add(&mut self, dir: &Path) -> Result<()>;

    /// Release the subscription. Consumes the resource so it can only be
    /// released once.
    fn close(self) -> Result<()>;
}

/// Receiving ends for everything a watch resource reports.
#[derive(Debug)]
pub struct WatchStreams {
    pub events: mpsc::UnboundedReceiver<ChangeEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// Sending ends matching [`WatchStreams`].
#[derive(Debug, Clone)]
pub struct WatchSenders {
    pub events: mpsc::UnboundedSender<ChangeEvent>,
    pub errors: mpsc::UnboundedSender<notify::Error>,
}

/// Create a connected sender/receiver pair.
pub fn watch_channels() -> (WatchSenders, WatchStreams) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (error_tx, error_rx) = mpsc::unbounded_channel();
    (
        WatchSenders {
            events: event_tx,
            errors: error_tx,
        },
        WatchStreams {
            events: event_rx,
            errors: error_rx,
        },
    )
}

/// Production watch resource backed by `notify::RecommendedWatcher`.
///
/// notify runs its own delivery thread; the callback forwards into unbounded
/// Tokio channels so the engine can `select!` over them.
pub struct NotifyWatchResource {
    inner: RecommendedWatcher,
    watched: Vec<PathBuf>,
}

impl std::fmt::Debug for NotifyWatchResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyWatchResource")
            .field("watched", &self.watched.len())
            .finish_non_exhaustive()
    }
}

impl NotifyWatchResource {
    pub fn new() -> Result<(Self, WatchStreams)> {
        let (senders, streams) = watch_channels();

        // Runs on notify's delivery thread.
        let inner = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for change in ChangeEvent::from_notify(event) {
                        if senders.events.send(change).is_err() {
                            trace!("engine no longer listening; change dropped");
                        }
                    }
                }
                Err(err) => {
                    if senders.errors.send(err).is_err() {
                        trace!("engine no longer listening; watch error dropped");
                    }
                }
            },
            Config::default(),
        )
        .map_err(GowatchError::Watch)?;

        Ok((
            Self {
                inner,
                watched: Vec::new(),
            },
            streams,
        ))
    }
}

impl WatchResource for NotifyWatchResource {
    fn add(&mut self, dir: &Path) -> Result<()> {
        self.inner
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| GowatchError::Subscribe {
                path: dir.to_path_buf(),
                source,
            })?;
        self.watched.push(dir.to_path_buf());
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        for dir in self.watched.drain(..) {
            // Directories removed during the run can no longer be unwatched.
            if let Err(err) = self.inner.unwatch(&dir) {
                debug!(dir = ?dir, error = %err, "unwatch failed during close");
            }
        }
        debug!("notify watcher released");
        Ok(())
    }
}
