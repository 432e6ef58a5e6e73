// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `gowatch`.
///
/// List flags take comma-separated values and, when given, replace the
/// corresponding list from the config file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gowatch",
    version,
    about = "Rebuild and restart a program whenever its sources change.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch, build in, and name the binary after.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub dir: String,

    /// Flags passed to the build command (comma-separated).
    #[arg(short = 'b', long, value_name = "FLAGS", value_delimiter = ',', allow_hyphen_values = true)]
    pub build_flags: Option<Vec<String>>,

    /// Flags passed to the program when it is started (comma-separated).
    #[arg(short = 'r', long, value_name = "FLAGS", value_delimiter = ',', allow_hyphen_values = true)]
    pub run_flags: Option<Vec<String>>,

    /// Glob patterns of files whose changes never trigger a restart
    /// (comma-separated), e.g. `*_test.go`.
    #[arg(short = 'i', long, value_name = "PATTERNS", value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Suffix of tracked source files (default `.go`).
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Path to a config file (TOML).
    ///
    /// Default: `gowatch.toml` in the watched directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GOWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve settings, print the initial watch set, but don't build or run.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_lists() {
        let args = CliArgs::try_parse_from([
            "gowatch",
            "-d",
            "/proj",
            "-b",
            "-race,-v",
            "-r",
            "--port,8080",
            "-i",
            "*_test.go,*.pb.go",
        ])
        .unwrap();

        assert_eq!(args.dir, "/proj");
        assert_eq!(args.build_flags.unwrap(), vec!["-race", "-v"]);
        assert_eq!(args.run_flags.unwrap(), vec!["--port", "8080"]);
        assert_eq!(args.ignore.unwrap(), vec!["*_test.go", "*.pb.go"]);
    }

    #[test]
    fn lists_default_to_none() {
        let args = CliArgs::try_parse_from(["gowatch"]).unwrap();
        assert_eq!(args.dir, ".");
        assert!(args.build_flags.is_none());
        assert!(args.ignore.is_none());
        assert!(!args.dry_run);
    }
}
