use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::debug;
use taskharness::errors::ExecutionError;
use taskharness::exec::{CapturedOutput, LaunchOutcome, LaunchRequest, ProcessLauncher};

/// A fake launcher that:
/// - records every `LaunchRequest` it receives
/// - immediately completes each launch with the next queued outcome
///   (successful empty output once the queue is exhausted).
#[derive(Debug, Clone, Default)]
pub struct FakeLauncher {
    outcomes: Arc<Mutex<VecDeque<LaunchOutcome>>>,
    launched: Arc<Mutex<Vec<LaunchRequest>>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run printing `stdout` / `stderr`.
    pub fn with_output(self, stdout: &str, stderr: &str) -> Self {
        self.push(Ok(CapturedOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
        self
    }

    /// Queue an execution failure.
    pub fn with_error(self, error: ExecutionError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, outcome: LaunchOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Requests seen so far.
    pub fn launched(&self) -> Vec<LaunchRequest> {
        self.launched.lock().unwrap().clone()
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&mut self, request: LaunchRequest) -> oneshot::Receiver<LaunchOutcome> {
        debug!(task = %request.task, script = ?request.script_path, "fake launch");
        self.launched.lock().unwrap().push(request);

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CapturedOutput::default()));

        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        rx
    }
}

/// A launcher that drops its completion sender without reporting.
#[derive(Debug, Default)]
pub struct SilentLauncher;

impl ProcessLauncher for SilentLauncher {
    fn launch(&mut self, request: LaunchRequest) -> oneshot::Receiver<LaunchOutcome> {
        debug!(task = %request.task, "silent launch; dropping completion sender");
        let (_tx, rx) = oneshot::channel();
        rx
    }
}
