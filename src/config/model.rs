// src/config/model.rs

use serde::Deserialize;

/// File looked up in the watched directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gowatch.toml";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [build]
/// command = ["go", "build"]
/// flags = ["-race"]
///
/// [run]
/// flags = ["--port", "8080"]
///
/// [watch]
/// ignore = ["*_test.go", "*.pb.go"]
/// suffix = ".go"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Program and leading arguments of the build tool. `-o <binary>` and the
    /// build flags are appended.
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    #[serde(default)]
    pub flags: Vec<String>,
}

fn default_build_command() -> Vec<String> {
    vec!["go".to_string(), "build".to_string()]
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            command: default_build_command(),
            flags: Vec::new(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunSection {
    /// Arguments passed to the compiled program.
    #[serde(default)]
    pub flags: Vec<String>,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Glob patterns for paths that must not trigger a restart.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Suffix identifying tracked source files.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_suffix() -> String {
    ".go".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            suffix: default_suffix(),
        }
    }
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    build: BuildSection,
    run: RunSection,
    watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(build: BuildSection, run: RunSection, watch: WatchSection) -> Self {
        Self { build, run, watch }
    }

    pub fn build(&self) -> &BuildSection {
        &self.build
    }

    pub fn run(&self) -> &RunSection {
        &self.run
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            BuildSection::default(),
            RunSection::default(),
            WatchSection::default(),
        )
    }
}
