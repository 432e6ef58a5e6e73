// src/config/mod.rs

//! Configuration loading and validation for gowatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it (`validate.rs`).
//! - Merge it with CLI flags into the effective [`Settings`] (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{
    BuildSection, ConfigFile, RawConfigFile, RunSection, WatchSection, DEFAULT_CONFIG_FILE,
};
pub use settings::Settings;
