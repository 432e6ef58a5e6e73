use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gowatch::errors::GowatchError;
use gowatch::exec::{App, AppFuture, ProcessHandle};

/// Calls observed by a [`FakeApp`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCall {
    Compile,
    Start,
    Restart(Option<ProcessHandle>),
    Shutdown,
}

/// Failures a [`FakeApp`] can be scripted to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFailure {
    Compile,
    Launch,
}

impl FakeFailure {
    fn into_error(self) -> GowatchError {
        match self {
            FakeFailure::Compile => GowatchError::Compile {
                code: Some(2),
                output: "main.go:1: syntax error".to_string(),
            },
            FakeFailure::Launch => GowatchError::Launch {
                binary: PathBuf::from("/proj/proj"),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            },
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<AppCall>,
    compile_failures: VecDeque<FakeFailure>,
    start_failures: VecDeque<FakeFailure>,
    restart_failures: VecDeque<FakeFailure>,
    live: Option<ProcessHandle>,
    max_live: usize,
    generation: u64,
}

impl FakeState {
    fn launch(&mut self) -> ProcessHandle {
        self.generation += 1;
        let handle = ProcessHandle {
            generation: self.generation,
            pid: Some(1000 + self.generation as u32),
        };
        self.live = Some(handle);
        self.max_live = self.max_live.max(1);
        handle
    }
}

/// An `App` that spawns nothing and records every call.
///
/// Clones share state, so a test can keep one clone while the watcher owns
/// the other.
#[derive(Debug, Clone, Default)]
pub struct FakeApp {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_compile(&self, failure: FakeFailure) {
        self.state.lock().unwrap().compile_failures.push_back(failure);
    }

    pub fn fail_start(&self, failure: FakeFailure) {
        self.state.lock().unwrap().start_failures.push_back(failure);
    }

    /// Make the next `restart` fail with `failure` (after terminating the
    /// live instance, as the real runner does).
    pub fn fail_next_restart(&self, failure: FakeFailure) {
        self.state.lock().unwrap().restart_failures.push_back(failure);
    }

    pub fn calls(&self) -> Vec<AppCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn restart_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, AppCall::Restart(_)))
            .count()
    }

    pub fn shutdown_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, AppCall::Shutdown))
            .count()
    }

    pub fn live(&self) -> Option<ProcessHandle> {
        self.state.lock().unwrap().live
    }

    /// Highest number of simultaneously live instances ever observed.
    pub fn max_live(&self) -> usize {
        self.state.lock().unwrap().max_live
    }
}

impl App for FakeApp {
    fn compile(&mut self) -> AppFuture<'_, ()> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            let mut state = state.lock().unwrap();
            state.calls.push(AppCall::Compile);
            match state.compile_failures.pop_front() {
                Some(failure) => Err(failure.into_error()),
                None => Ok(()),
            }
        })
    }

    fn start(&mut self) -> AppFuture<'_, ProcessHandle> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            let mut state = state.lock().unwrap();
            state.calls.push(AppCall::Start);
            if let Some(failure) = state.start_failures.pop_front() {
                return Err(failure.into_error());
            }
            if state.live.is_some() {
                state.max_live = 2;
            }
            Ok(state.launch())
        })
    }

    fn restart(&mut self, previous: Option<ProcessHandle>) -> AppFuture<'_, ProcessHandle> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            let mut state = state.lock().unwrap();
            state.calls.push(AppCall::Restart(previous));
            state.live = None;
            if let Some(failure) = state.restart_failures.pop_front() {
                return Err(failure.into_error());
            }
            Ok(state.launch())
        })
    }

    fn shutdown(&mut self) -> AppFuture<'_, ()> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            let mut state = state.lock().unwrap();
            state.calls.push(AppCall::Shutdown);
            state.live = None;
            Ok(())
        })
    }
}
