// src/exec/runner.rs

//! Real `App` implementation: shells out to the build tool and runs the
//! resulting binary as a child process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::errors::{GowatchError, Result};
use crate::exec::app::{App, AppFuture, ProcessHandle};

/// Name of the binary produced for a project rooted at `root`: the final
/// path segment plus the platform executable suffix.
pub fn binary_name_for(root: &Path) -> String {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string());
    format!("{base}{}", std::env::consts::EXE_SUFFIX)
}

struct RunningChild {
    handle: ProcessHandle,
    child: Child,
}

/// Compiles the project with the configured build command and keeps at most
/// one instance of the resulting binary running.
pub struct AppRunner {
    root: PathBuf,
    build_command: Vec<String>,
    build_flags: Vec<String>,
    run_flags: Vec<String>,
    binary_name: String,
    current: Option<RunningChild>,
    generation: u64,
}

impl std::fmt::Debug for AppRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRunner")
            .field("root", &self.root)
            .field("binary_name", &self.binary_name)
            .field("current", &self.current_handle())
            .finish_non_exhaustive()
    }
}

impl AppRunner {
    pub fn new(
        root: impl Into<PathBuf>,
        build_command: Vec<String>,
        build_flags: Vec<String>,
        run_flags: Vec<String>,
    ) -> Self {
        let root = root.into();
        let binary_name = binary_name_for(&root);
        Self {
            root,
            build_command,
            build_flags,
            run_flags,
            binary_name,
            current: None,
            generation: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.root.clone(),
            settings.build_command.clone(),
            settings.build_flags.clone(),
            settings.run_flags.clone(),
        )
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn binary_path(&self) -> PathBuf {
        self.root.join(&self.binary_name)
    }

    /// Handle of the live instance, if one was started and not yet
    /// terminated.
    pub fn current_handle(&self) -> Option<ProcessHandle> {
        self.current.as_ref().map(|c| c.handle)
    }

    async fn compile_inner(&mut self) -> Result<()> {
        let (program, args) = self.build_command.split_first().ok_or_else(|| {
            GowatchError::ConfigError("build command must not be empty".to_string())
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg("-o")
            .arg(&self.binary_name)
            .args(&self.build_flags)
            .current_dir(&self.root)
            .stdin(Stdio::null());

        info!(
            program = %program,
            binary = %self.binary_name,
            flags = ?self.build_flags,
            "compiling program"
        );

        let output = cmd.output().await.map_err(|source| GowatchError::BuildTool {
            program: program.clone(),
            source,
        })?;

        if output.status.success() {
            info!(binary = %self.binary_name, "compile succeeded");
            return Ok(());
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Err(GowatchError::Compile {
            code: output.status.code(),
            output: text.trim_end().to_string(),
        })
    }

    fn start_inner(&mut self) -> Result<ProcessHandle> {
        let binary = self.binary_path();

        let mut cmd = Command::new(&binary);
        cmd.args(&self.run_flags)
            .current_dir(&self.root)
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|source| GowatchError::Launch { binary, source })?;

        self.generation += 1;
        let handle = ProcessHandle {
            generation: self.generation,
            pid: child.id(),
        };

        info!(%handle, flags = ?self.run_flags, "program started");
        self.current = Some(RunningChild { handle, child });
        Ok(handle)
    }

    async fn terminate(&mut self) -> Result<()> {
        let Some(mut running) = self.current.take() else {
            return Ok(());
        };
        let handle = running.handle;

        match running.child.try_wait() {
            Ok(Some(status)) => {
                debug!(%handle, %status, "program already exited");
                return Ok(());
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%handle, error = %err, "could not query program status; killing anyway");
            }
        }

        running
            .child
            .kill()
            .await
            .map_err(|source| GowatchError::Terminate {
                pid: handle.pid,
                source,
            })?;

        info!(%handle, "program terminated");
        Ok(())
    }

    async fn start_fresh(&mut self) -> Result<ProcessHandle> {
        // Never leave a previous instance running next to the new one.
        self.terminate().await?;
        self.start_inner()
    }

    async fn restart_inner(&mut self, previous: Option<ProcessHandle>) -> Result<ProcessHandle> {
        let current = self.current_handle();
        if previous.is_some() && previous != current {
            debug!(
                previous = ?previous,
                current = ?current,
                "restart requested with a handle that is no longer live"
            );
        }

        self.terminate().await?;
        self.compile_inner().await?;
        self.start_inner()
    }
}

impl App for AppRunner {
    fn compile(&mut self) -> AppFuture<'_, ()> {
        Box::pin(self.compile_inner())
    }

    fn start(&mut self) -> AppFuture<'_, ProcessHandle> {
        Box::pin(self.start_fresh())
    }

    fn restart(&mut self, previous: Option<ProcessHandle>) -> AppFuture<'_, ProcessHandle> {
        Box::pin(self.restart_inner(previous))
    }

    fn shutdown(&mut self) -> AppFuture<'_, ()> {
        Box::pin(self.terminate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_name_uses_last_segment() {
        let suffix = std::env::consts::EXE_SUFFIX;
        assert_eq!(binary_name_for(Path::new("/proj")), format!("proj{suffix}"));
        assert_eq!(binary_name_for(Path::new("/work/proj/")), format!("proj{suffix}"));
        assert_eq!(binary_name_for(Path::new("/")), format!("app{suffix}"));
    }

    #[test]
    fn binary_lives_in_root() {
        let runner = AppRunner::new("/work/proj", vec!["go".into(), "build".into()], vec![], vec![]);
        assert_eq!(runner.binary_path(), Path::new("/work/proj").join(runner.binary_name()));
        assert!(runner.current_handle().is_none());
    }
}
