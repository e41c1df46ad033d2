use std::fmt;

use serde::Serialize;

/// Lifecycle of a single [`TaskRunner`](crate::session::TaskRunner) session.
///
/// `Configuring -> Starting -> Running -> Completed`, or `Running -> Failed`.
/// A configuration error raised while `Starting` leaves the session in
/// `Starting`; it cannot be run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Configuring,
    Starting,
    Running,
    Completed,
    Failed,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    pub fn is_finished(self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

/// Lifecycle notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Starting { task: String },
    Completed { task: String },
    Failed { task: String, error: String },
}

/// Runtime a task manifest can declare an execution target for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Node,
    PowerShell,
}

impl Runtime {
    /// Key used under `execution` in `task.json`.
    pub fn manifest_key(self) -> &'static str {
        match self {
            Runtime::Node => "Node",
            Runtime::PowerShell => "PowerShell",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}
