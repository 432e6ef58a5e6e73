// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile, DEFAULT_CONFIG_FILE};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks the build command, the source suffix and every ignore glob.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Path of the implicit config file for a watched directory.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}

/// Load `explicit` if given, else the implicit file under `root` if it
/// exists, else the built-in defaults.
pub fn load_optional(explicit: Option<&Path>, root: &Path) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        debug!(path = ?path, "loading config file");
        return load_and_validate(path);
    }

    let implicit = default_config_path(root);
    if implicit.is_file() {
        debug!(path = ?implicit, "loading config file found in watch directory");
        return load_and_validate(&implicit);
    }

    Ok(ConfigFile::default())
}
