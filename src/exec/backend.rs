// src/exec/backend.rs

//! Pluggable process launcher abstraction.
//!
//! A session talks to a `ProcessLauncher` instead of spawning processes
//! itself, so tests can swap in a launcher that replays canned output.
//!
//! - [`NodeLauncher`] is the production implementation. It runs the entry
//!   script under an interpreter (`node` by default) on a Tokio task.
//! - Every launch hands back a `oneshot::Receiver`, which carries exactly one
//!   [`LaunchOutcome`].

use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::env::TaskEnv;
use crate::errors::ExecutionError;

use super::process::run_script;

/// Everything needed to start one task process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Task name, for logging.
    pub task: String,
    /// Sandbox directory; becomes the child's cwd.
    pub working_dir: PathBuf,
    /// Absolute path of the entry script.
    pub script_path: PathBuf,
    /// Complete child environment. Nothing else is inherited.
    pub env: TaskEnv,
}

/// Full stdout/stderr of a process that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

pub type LaunchOutcome = Result<CapturedOutput, ExecutionError>;

/// Trait abstracting how a task process is started.
pub trait ProcessLauncher: Send {
    /// Start the process described by `request`.
    ///
    /// Must not block. The returned receiver resolves once, after the process
    /// has exited and its output has been read to the end.
    fn launch(&mut self, request: LaunchRequest) -> oneshot::Receiver<LaunchOutcome>;
}

/// Launcher that interprets the entry script with a real interpreter.
#[derive(Debug, Clone)]
pub struct NodeLauncher {
    interpreter: String,
}

impl NodeLauncher {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for NodeLauncher {
    fn default() -> Self {
        Self::new("node")
    }
}

impl ProcessLauncher for NodeLauncher {
    fn launch(&mut self, request: LaunchRequest) -> oneshot::Receiver<LaunchOutcome> {
        let (tx, rx) = oneshot::channel();
        let interpreter = self.interpreter.clone();

        tokio::spawn(async move {
            let task = request.task.clone();
            let outcome = run_script(&interpreter, request).await;
            if tx.send(outcome).is_err() {
                tracing::debug!(task = %task, "launch result dropped; receiver went away");
            }
        });

        rx
    }
}
