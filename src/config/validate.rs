// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GowatchError, Result};
use crate::watch::PathFilter;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GowatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.build, raw.run, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_build_command(&cfg.build.command)?;
    validate_suffix(&cfg.watch.suffix)?;
    validate_ignore_patterns(&cfg.watch.ignore)?;
    Ok(())
}

pub(crate) fn validate_build_command(command: &[String]) -> Result<()> {
    match command.first() {
        None => Err(GowatchError::ConfigError(
            "[build].command must name a program".to_string(),
        )),
        Some(program) if program.trim().is_empty() => Err(GowatchError::ConfigError(
            "[build].command program must not be blank".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

pub(crate) fn validate_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() {
        return Err(GowatchError::ConfigError(
            "[watch].suffix must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Malformed globs are rejected here rather than at the first change event.
fn validate_ignore_patterns(patterns: &[String]) -> Result<()> {
    PathFilter::new(patterns)?;
    Ok(())
}
