// src/engine/watcher.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::Settings;
use crate::errors::{GowatchError, Result};
use crate::exec::{App, AppRunner, ProcessHandle};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{
    discover_directories, is_tracked_source, ChangeEvent, ChangeKind, NotifyWatchResource,
    PathFilter, WatchResource, WatchStreams,
};

use super::stop::StopHandle;
use super::watch_set::WatchSet;
use super::{EngineState, RunOutcome};

/// What a single loop iteration picked up.
enum Next {
    Stop,
    Change(Option<ChangeEvent>),
    Error(Option<notify::Error>),
}

/// Watches a source tree and keeps the program built and running.
///
/// The watcher owns the watch resource and the live watch set; the `App`
/// owns the child process. `run` drives everything from a single task:
/// compile, start, subscribe, then loop over change events, watch errors and
/// stop requests until one of them ends the run.
pub struct Watcher<A: App, W: WatchResource> {
    root: PathBuf,
    source_suffix: String,
    filter: PathFilter,
    app: A,
    watch: Option<W>,
    watch_set: WatchSet,
    events: mpsc::UnboundedReceiver<ChangeEvent>,
    errors: mpsc::UnboundedReceiver<notify::Error>,
    errors_open: bool,
    stop: StopHandle,
    stop_rx: mpsc::Receiver<()>,
    current: Option<ProcessHandle>,
    state: EngineState,
    fs: Arc<dyn FileSystem>,
}

impl<A: App, W: WatchResource> fmt::Debug for Watcher<A, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("root", &self.root)
            .field("source_suffix", &self.source_suffix)
            .field("filter", &self.filter)
            .field("watch_set", &self.watch_set)
            .field("current", &self.current)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Watcher<AppRunner, NotifyWatchResource> {
    /// Production wiring: `AppRunner` + `notify` backend on the real
    /// filesystem.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let filter = PathFilter::new(&settings.ignore)?;
        let (watch, streams) = NotifyWatchResource::new()?;
        Ok(Self::new(
            settings.root.clone(),
            settings.source_suffix.clone(),
            filter,
            AppRunner::from_settings(settings),
            watch,
            streams,
        ))
    }
}

impl<A: App, W: WatchResource> Watcher<A, W> {
    pub fn new(
        root: impl Into<PathBuf>,
        source_suffix: impl Into<String>,
        filter: PathFilter,
        app: A,
        watch: W,
        streams: WatchStreams,
    ) -> Self {
        let (stop, stop_rx) = StopHandle::channel();
        Self {
            root: root.into(),
            source_suffix: source_suffix.into(),
            filter,
            app,
            watch: Some(watch),
            watch_set: WatchSet::new(),
            events: streams.events,
            errors: streams.errors,
            errors_open: true,
            stop,
            stop_rx,
            current: None,
            state: EngineState::NotStarted,
            fs: Arc::new(RealFileSystem),
        }
    }

    /// Replace the filesystem used for directory discovery.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn watch_set(&self) -> &WatchSet {
        &self.watch_set
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Handle of the instance the watcher believes is running.
    pub fn current_process(&self) -> Option<ProcessHandle> {
        self.current
    }

    /// Build, start and watch until stopped or a fatal error occurs.
    ///
    /// `shutdown` runs exactly once on every path out of here. If both the
    /// run and the shutdown fail, the error carries both.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        if self.state != EngineState::NotStarted {
            return Err(GowatchError::AlreadyStarted);
        }

        let result = self.run_inner().await;
        let shutdown = self.shutdown().await;

        match (result, shutdown) {
            (Ok(outcome), Ok(())) => {
                info!(?outcome, "watcher stopped");
                Ok(outcome)
            }
            (Ok(_), Err(err)) => Err(err),
            (Err(cause), Ok(())) => Err(cause),
            (Err(cause), Err(shutdown)) => Err(GowatchError::Shutdown {
                cause: Box::new(cause),
                shutdown: Box::new(shutdown),
            }),
        }
    }

    async fn run_inner(&mut self) -> Result<RunOutcome> {
        self.state = EngineState::Watching;

        self.app.compile().await?;
        self.current = Some(self.app.start().await?);

        let directories = discover_directories(self.fs.as_ref(), &self.root)?;
        self.subscribe(directories)?;

        info!(
            root = ?self.root,
            directories = self.watch_set.len(),
            suffix = %self.source_suffix,
            ignore = ?self.filter.patterns().collect::<Vec<_>>(),
            "watching for changes"
        );

        loop {
            if let Some(outcome) = self.next_event().await? {
                return Ok(outcome);
            }
        }
    }

    /// One loop iteration: wait for whichever source is ready first and
    /// handle it. Returns `Some` only for a stop request.
    async fn next_event(&mut self) -> Result<Option<RunOutcome>> {
        let next = tokio::select! {
            _ = self.stop_rx.recv() => Next::Stop,
            event = self.events.recv() => Next::Change(event),
            error = self.errors.recv(), if self.errors_open => Next::Error(error),
        };

        match next {
            Next::Stop => {
                info!("stop requested");
                Ok(Some(RunOutcome::StopRequested))
            }
            Next::Change(Some(event)) => {
                self.handle_change(event).await?;
                Ok(None)
            }
            Next::Change(None) => Err(GowatchError::WatchStreamClosed),
            Next::Error(Some(err)) => Err(GowatchError::Watch(err)),
            Next::Error(None) => {
                debug!("watch error stream closed");
                self.errors_open = false;
                Ok(None)
            }
        }
    }

    async fn handle_change(&mut self, event: ChangeEvent) -> Result<()> {
        trace!(?event, "change event");

        match event.kind {
            ChangeKind::Created => {
                let is_dir = self.fs.is_dir(&event.path);
                match is_dir {
                    Ok(true) => self.extend_watch(&event.path),
                    Ok(false) => Ok(()),
                    Err(err) => {
                        debug!(
                            path = ?event.path,
                            error = %err,
                            "created path vanished before it could be inspected"
                        );
                        Ok(())
                    }
                }
            }
            ChangeKind::Written if is_tracked_source(&event.path, &self.source_suffix) => {
                self.restart_for(&event.path).await
            }
            ChangeKind::Written | ChangeKind::Other => Ok(()),
        }
    }

    fn extend_watch(&mut self, dir: &Path) -> Result<()> {
        let directories = discover_directories(self.fs.as_ref(), dir)?;
        debug!(?directories, "found new directories");
        self.subscribe(directories)
    }

    fn subscribe(&mut self, directories: impl IntoIterator<Item = PathBuf>) -> Result<()> {
        let watch = self
            .watch
            .as_mut()
            .ok_or(GowatchError::EngineNotInitialized)?;

        for dir in directories {
            if self.watch_set.contains(&dir) {
                continue;
            }
            watch.add(&dir)?;
            trace!(dir = ?dir, "watching directory");
            self.watch_set.insert(dir);
        }
        Ok(())
    }

    async fn restart_for(&mut self, path: &Path) -> Result<()> {
        if let Some(pattern) = self.filter.matching_pattern(path) {
            debug!(path = ?path, pattern, "ignored change");
            return Ok(());
        }

        info!(path = ?path, "modified file");

        match self.app.restart(self.current).await {
            Ok(handle) => {
                self.current = Some(handle);
                Ok(())
            }
            Err(err) if err.is_compile_error() => {
                self.current = None;
                warn!(error = %err, "compile failed; waiting for the next change");
                Ok(())
            }
            Err(err) => {
                self.current = None;
                Err(err)
            }
        }
    }

    /// Release the watch resource and stop the program.
    ///
    /// Fails with `EngineNotInitialized` when there is no watch resource,
    /// i.e. on any call after the first.
    pub async fn shutdown(&mut self) -> Result<()> {
        debug!("clean up...");
        let watch = self
            .watch
            .take()
            .ok_or(GowatchError::EngineNotInitialized)?;
        self.state = EngineState::ShuttingDown;

        let released = watch.close();
        let stopped = self.app.shutdown().await;
        self.current = None;
        self.state = EngineState::Stopped;

        match (released, stopped) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
            (Err(err), Err(app_err)) => {
                warn!(error = %app_err, "failed to stop program during shutdown");
                Err(err)
            }
        }
    }
}
