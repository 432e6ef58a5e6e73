// src/engine/stop.rs

use tokio::sync::mpsc;
use tracing::debug;

/// Requests a graceful stop of a running [`Watcher`](super::Watcher).
///
/// Cloneable so it can be handed to a Ctrl-C task and to tests alike. The
/// request is observed between loop iterations; an in-flight restart
/// finishes first.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: mpsc::Sender<()>,
}

impl StopHandle {
    pub(crate) fn channel() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }

    /// Ask the watcher to stop. Repeated calls are harmless.
    pub fn stop(&self) {
        if self.tx.try_send(()).is_err() {
            debug!("stop already requested");
        }
    }
}
