// src/logging.rs

//! Logging setup for `taskharness` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TASKHARNESS_LOG` environment variable (e.g. "info", "debug")
//! 3. `debug` if `TASK_TEST_TRACE` is set (echoes captured task output)
//! 4. default to `info`
//!
//! Logs are sent to STDERR so that stdout carries only the run report.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => level_from_env(|key| std::env::var(key).ok()),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Resolve the level from environment variables via `lookup`.
pub fn level_from_env<F>(lookup: F) -> tracing::Level
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup("TASKHARNESS_LOG").and_then(|s| parse_level_str(&s)) {
        return level;
    }
    if lookup("TASK_TEST_TRACE").is_some_and(|s| !s.is_empty()) {
        return tracing::Level::DEBUG;
    }
    tracing::Level::INFO
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
