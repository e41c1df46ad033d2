// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskharness`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskharness",
    version,
    about = "Run a build task in a sandbox and report what it did.",
    long_about = None
)]
pub struct CliArgs {
    /// Name of the task directory under the tasks root.
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Task input as NAME=VALUE. May be repeated.
    #[arg(long = "input", short = 'i', value_name = "NAME=VALUE", value_parser = parse_input)]
    pub inputs: Vec<(String, String)>,

    /// Path to the harness config file (TOML).
    ///
    /// If omitted, `Harness.toml` is used when it exists; otherwise the
    /// configuration comes from the environment only.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sandbox root (overrides `TASK_TEST_TEMP` and the config file).
    #[arg(long, value_name = "DIR")]
    pub temp: Option<PathBuf>,

    /// Directory containing task sources.
    #[arg(long, value_name = "DIR")]
    pub tasks_root: Option<PathBuf>,

    /// Program that interprets the entry script.
    #[arg(long, value_name = "BIN")]
    pub interpreter: Option<String>,

    /// Treat `\` and `/` as equal when matching command lines.
    #[arg(long)]
    pub ignore_slashes: bool,

    /// Fail unless this command line was invoked. May be repeated.
    #[arg(long, value_name = "LINE")]
    pub expect_command: Vec<String>,

    /// Print the result state as JSON.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKHARNESS_LOG` or a default level will be used.
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

fn parse_input(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
