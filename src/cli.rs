// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the `trackdag` inspector.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trackdag",
    version,
    about = "Validate a computation plan and show its tracked checkpoints.",
    long_about = None
)]
pub struct CliArgs {
    /// Plan file (TOML) describing one computation.
    #[arg(long, value_name = "PATH")]
    pub plan: String,

    /// Path to the config file (TOML). Missing file means defaults.
    #[arg(long, value_name = "PATH", default_value = "Trackdag.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRACKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
