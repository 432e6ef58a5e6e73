// src/config/settings.rs

//! Effective settings: config file values overridden by CLI flags.

use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::loader::load_optional;
use crate::config::model::ConfigFile;
use crate::config::validate::{validate_build_command, validate_suffix};
use crate::errors::{GowatchError, Result};
use crate::watch::PathFilter;

/// Everything needed to construct the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Canonicalized directory to watch and build in.
    pub root: PathBuf,
    pub build_command: Vec<String>,
    pub build_flags: Vec<String>,
    pub run_flags: Vec<String>,
    pub ignore: Vec<String>,
    pub source_suffix: String,
}

impl Settings {
    /// Settings for `root` taken straight from a config file.
    pub fn from_config(root: impl Into<PathBuf>, cfg: &ConfigFile) -> Self {
        Self {
            root: root.into(),
            build_command: cfg.build().command.clone(),
            build_flags: cfg.build().flags.clone(),
            run_flags: cfg.run().flags.clone(),
            ignore: cfg.watch().ignore.clone(),
            source_suffix: cfg.watch().suffix.clone(),
        }
    }

    /// Resolve the watch directory, load the config file and apply CLI
    /// overrides on top.
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let root = canonical_root(Path::new(&args.dir))?;
        let cfg = load_optional(args.config.as_deref().map(Path::new), &root)?;
        let mut settings = Self::from_config(root, &cfg);

        if let Some(flags) = &args.build_flags {
            settings.build_flags = flags.clone();
        }
        if let Some(flags) = &args.run_flags {
            settings.run_flags = flags.clone();
        }
        if let Some(patterns) = &args.ignore {
            settings.ignore = patterns.clone();
        }
        if let Some(suffix) = &args.suffix {
            settings.source_suffix = suffix.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        validate_build_command(&self.build_command)?;
        validate_suffix(&self.source_suffix)?;
        PathFilter::new(&self.ignore)?;
        Ok(())
    }
}

fn canonical_root(dir: &Path) -> Result<PathBuf> {
    let root = dir.canonicalize().map_err(|err| {
        GowatchError::ConfigError(format!("cannot use watch directory {:?}: {err}", dir))
    })?;
    if !root.is_dir() {
        return Err(GowatchError::ConfigError(format!(
            "watch directory {:?} is not a directory",
            root
        )));
    }
    Ok(root)
}
