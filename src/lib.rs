// src/lib.rs

pub mod cli;
pub mod config;
pub mod env;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod protocol;
pub mod result;
pub mod sandbox;
pub mod session;
pub mod types;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::config::{HarnessConfig, RawHarnessConfig, apply_env_overrides, default_config_path, load_from_path};
use crate::errors::HarnessError;

pub use crate::result::ResultState;
pub use crate::session::TaskRunner;

/// High-level entry point used by `main.rs`.
///
/// Builds the config (file, then environment, then CLI flags), runs one
/// session and prints a report. Returns whether the run passed: the task
/// completed, did not report failure, and invoked every expected command.
///
/// Configuration errors are returned as `Err`; an execution error is
/// reported and counts as a failed run.
pub async fn run(args: CliArgs) -> Result<bool> {
    let config = build_config(&args)?;

    let mut runner = TaskRunner::new(args.task.clone(), config);
    for (name, value) in &args.inputs {
        runner.set_input(name.clone(), value.clone());
    }

    let execution_error = match runner.run_node().await {
        Ok(()) => None,
        Err(HarnessError::Execution(err)) => Some(err),
        Err(other) => return Err(other.into()),
    };

    let missing: Vec<&str> = args
        .expect_command
        .iter()
        .map(String::as_str)
        .filter(|line| !runner.ran(line))
        .collect();

    let passed = execution_error.is_none() && !runner.result().failed && missing.is_empty();

    if args.json {
        let report = serde_json::json!({
            "task": runner.name(),
            "state": runner.state(),
            "passed": passed,
            "result": runner.result(),
            "missing_commands": missing,
            "execution_error": execution_error.as_ref().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&runner, &missing, execution_error.as_ref(), passed);
    }

    Ok(passed)
}

fn build_config(args: &CliArgs) -> Result<HarnessConfig> {
    let mut raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(?path, "using default config file");
                load_from_path(&path)?
            } else {
                RawHarnessConfig::default()
            }
        }
    };

    apply_env_overrides(&mut raw);

    if let Some(temp) = &args.temp {
        raw.temp_root = Some(temp.clone());
    }
    if let Some(root) = &args.tasks_root {
        raw.tasks_root = root.clone();
    }
    if let Some(interpreter) = &args.interpreter {
        raw.interpreter = interpreter.clone();
    }
    if args.ignore_slashes {
        raw.ignore_slashes = true;
    }

    Ok(HarnessConfig::try_from(raw)?)
}

fn print_report(
    runner: &TaskRunner,
    missing: &[&str],
    execution_error: Option<&errors::ExecutionError>,
    passed: bool,
) {
    let result = runner.result();
    println!("task {} ({:?})", runner.name(), runner.state());
    println!("  succeeded      = {}", result.succeeded);
    println!("  failed         = {}", result.failed);
    println!("  result_was_set = {}", result.result_was_set);
    println!("  invoked ({}):", result.invoked_command_count());
    for cmd in result.invoked_commands() {
        println!("    {cmd}");
    }

    for line in missing {
        println!("  MISSING: {line}");
    }

    if let Some(err) = execution_error {
        warn!(task = %runner.name(), error = %err, "execution error");
        println!("  execution error: {err}");
        if let errors::ExecutionError::NonZeroExit { stderr, .. } = err {
            if !stderr.is_empty() {
                println!("  stderr:\n{stderr}");
            }
        }
    }

    println!("{}", if passed { "PASS" } else { "FAIL" });
}
