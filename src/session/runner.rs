// src/session/runner.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::HarnessConfig;
use crate::env::{TaskEnv, base_env, build_task_env};
use crate::errors::{ExecutionError, HarnessError, Result};
use crate::exec::{NodeLauncher, ProcessLauncher};
use crate::fs::{FileSystem, RealFileSystem};
use crate::manifest::TaskManifest;
use crate::protocol::process_output;
use crate::result::ResultState;
use crate::sandbox::Sandbox;
use crate::types::{SessionEvent, SessionState};

use super::preflight::prepare;

/// One test execution of one task.
///
/// Configure inputs, call [`run`](Self::run) once, then assert against
/// [`result`](Self::result) or the query helpers.
pub struct TaskRunner {
    name: String,
    config: HarnessConfig,
    fs: Arc<dyn FileSystem>,
    inputs: BTreeMap<String, String>,
    base_env: TaskEnv,
    task_env: TaskEnv,
    sandbox: Option<Sandbox>,
    manifest: Option<TaskManifest>,
    result: ResultState,
    state: SessionState,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRunner")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("inputs", &self.inputs)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl TaskRunner {
    /// New session for `name`, reading the real filesystem.
    ///
    /// The mock-response path and slash mode are taken from `config` now;
    /// later changes to the config have no effect on this session.
    pub fn new(name: impl Into<String>, config: HarnessConfig) -> Self {
        let base_env = base_env(config.mock_responses.as_deref());
        let result = ResultState::new(config.ignore_slashes);
        Self {
            name: name.into(),
            config,
            fs: Arc::new(RealFileSystem),
            inputs: BTreeMap::new(),
            task_env: base_env.clone(),
            base_env,
            sandbox: None,
            manifest: None,
            result,
            state: SessionState::Configuring,
            subscribers: Vec::new(),
        }
    }

    /// Use another filesystem for staging and precondition checks.
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Treat `\` and `/` as equal when recording and matching command lines.
    ///
    /// Only the mode changes; anything already decoded is kept.
    pub fn with_ignore_slashes(mut self, ignore: bool) -> Self {
        self.result.set_normalize_slashes(ignore);
        self
    }

    /// Register a task input. Ignored once the session has started.
    pub fn set_input(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.state != SessionState::Configuring {
            warn!(
                task = %self.name,
                input = %name,
                state = ?self.state,
                "input set after run started; ignoring"
            );
            return;
        }
        self.inputs.insert(name, value.into());
    }

    /// Receive lifecycle events for this session.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Run with a [`NodeLauncher`] using the configured interpreter.
    pub async fn run_node(&mut self) -> Result<()> {
        let mut launcher = NodeLauncher::new(self.config.interpreter.clone());
        self.run(&mut launcher).await
    }

    /// Stage the task, launch it, and decode its output.
    ///
    /// Configuration problems are returned before anything is spawned. An
    /// execution error is returned after the process finished; in that case
    /// the result state keeps its defaults, so `succeeded` is still true.
    pub async fn run<L>(&mut self, launcher: &mut L) -> Result<()>
    where
        L: ProcessLauncher + ?Sized,
    {
        if self.state != SessionState::Configuring {
            return Err(HarnessError::AlreadyStarted);
        }

        self.state = SessionState::Starting;
        self.emit(SessionEvent::Starting {
            task: self.name.clone(),
        });

        self.task_env = build_task_env(&self.base_env, &self.inputs);
        let prepared = prepare(
            self.fs.as_ref(),
            &self.config,
            &self.name,
            self.task_env.clone(),
        )?;
        self.sandbox = Some(prepared.sandbox);
        self.manifest = Some(prepared.manifest);

        let Some(request) = prepared.launch else {
            self.finish_completed();
            return Ok(());
        };

        self.state = SessionState::Running;
        let completion = launcher.launch(request);
        let outcome = completion.await.unwrap_or(Err(ExecutionError::Dropped));

        match outcome {
            Ok(output) => {
                process_output(&mut self.result, &output.stdout, &output.stderr);
                self.finish_completed();
                Ok(())
            }
            Err(err) => {
                warn!(task = %self.name, error = %err, "task execution failed");
                self.state = SessionState::Failed;
                self.emit(SessionEvent::Failed {
                    task: self.name.clone(),
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn finish_completed(&mut self) {
        self.state = SessionState::Completed;
        info!(
            task = %self.name,
            succeeded = self.result.succeeded,
            result_was_set = self.result.result_was_set,
            invoked = self.result.invoked_command_count(),
            "task run completed"
        );
        self.emit(SessionEvent::Completed {
            task: self.name.clone(),
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Whether `line` was printed as a tool invocation.
    pub fn ran(&self, line: &str) -> bool {
        self.result.was_command_invoked(line)
    }

    /// Whether captured stderr contains `text` (case-sensitive).
    pub fn stderr_contained(&self, text: &str) -> bool {
        self.result.stderr_contains(text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn result(&self) -> &ResultState {
        &self.result
    }

    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    /// Environment the task process gets (final once the run has started).
    pub fn task_env(&self) -> &TaskEnv {
        &self.task_env
    }

    pub fn sandbox(&self) -> Option<&Sandbox> {
        self.sandbox.as_ref()
    }

    pub fn manifest(&self) -> Option<&TaskManifest> {
        self.manifest.as_ref()
    }
}
