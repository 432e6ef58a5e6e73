// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::Watcher;
use crate::errors::Result;
use crate::exec::binary_name_for;
use crate::fs::RealFileSystem;
use crate::watch::discover_directories;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution (config file + CLI overrides)
/// - the watcher with its real `AppRunner` and `notify` backend
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::resolve(&args)?;
    debug!(?settings, "resolved settings");

    if args.dry_run {
        return print_dry_run(&settings);
    }

    let mut watcher = Watcher::from_settings(&settings)?;

    // Ctrl-C → graceful shutdown.
    {
        let stop = watcher.stop_handle();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl+C: {e}");
                return;
            }
            info!("Ctrl+C received");
            stop.stop();
        });
    }

    let outcome = watcher.run().await?;
    debug!(?outcome, "watcher finished");
    Ok(())
}

/// Simple dry-run output: print the effective settings and the directories
/// that would be watched.
fn print_dry_run(settings: &Settings) -> Result<()> {
    let directories = discover_directories(&RealFileSystem, &settings.root)?;

    println!("gowatch dry-run");
    println!("  root = {}", settings.root.display());
    println!("  binary = {}", binary_name_for(&settings.root));
    println!("  build command = {:?}", settings.build_command);
    println!("  build flags = {:?}", settings.build_flags);
    println!("  run flags = {:?}", settings.run_flags);
    println!("  ignore = {:?}", settings.ignore);
    println!("  suffix = {}", settings.source_suffix);
    println!();

    println!("directories ({}):", directories.len());
    for dir in &directories {
        println!("  - {}", dir.display());
    }

    debug!("dry-run complete (no build)");
    Ok(())
}
