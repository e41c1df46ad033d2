// src/result.rs

//! Observable outcome of a session and the assertion helpers over it.

use serde::Serialize;

/// Accumulated outcome of one task run.
///
/// Starts optimistic: `succeeded` is true until a `task.complete` command
/// says otherwise. `result_was_set` tells an explicit report apart from that
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultState {
    pub succeeded: bool,
    pub failed: bool,
    pub result_was_set: bool,
    pub stdout: String,
    pub stderr: String,
    invoked_command_count: usize,
    invoked_commands: Vec<String>,
    #[serde(skip)]
    normalize_slashes: bool,
}

impl Default for ResultState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ResultState {
    pub fn new(normalize_slashes: bool) -> Self {
        Self {
            succeeded: true,
            failed: false,
            result_was_set: false,
            stdout: String::new(),
            stderr: String::new(),
            invoked_command_count: 0,
            invoked_commands: Vec::new(),
            normalize_slashes,
        }
    }

    pub fn normalize_slashes(&self) -> bool {
        self.normalize_slashes
    }

    /// Switch slash normalisation for later recordings and all matching.
    /// Lines already recorded are stored as they were.
    pub fn set_normalize_slashes(&mut self, normalize: bool) {
        self.normalize_slashes = normalize;
    }

    /// Number of `[command]` lines seen. Always equal to
    /// `invoked_commands().len()`.
    pub fn invoked_command_count(&self) -> usize {
        self.invoked_command_count
    }

    /// Recorded command lines in the order they were printed.
    pub fn invoked_commands(&self) -> &[String] {
        &self.invoked_commands
    }

    /// Record one tool invocation.
    pub fn record_invocation(&mut self, command_line: &str) {
        let command_line = command_line.trim();
        let stored = if self.normalize_slashes {
            to_forward_slashes(command_line)
        } else {
            command_line.to_string()
        };
        self.invoked_command_count += 1;
        self.invoked_commands.push(stored);
    }

    pub fn mark_succeeded(&mut self) {
        self.succeeded = true;
        self.failed = false;
        self.result_was_set = true;
    }

    pub fn mark_failed(&mut self) {
        self.succeeded = false;
        self.failed = true;
        self.result_was_set = true;
    }

    /// Whether `line` was invoked, comparing trimmed text exactly.
    ///
    /// With slash normalisation on, `\` and `/` are treated as equal on both
    /// sides.
    pub fn was_command_invoked(&self, line: &str) -> bool {
        let wanted = self.comparable(line);
        self.invoked_commands
            .iter()
            .any(|cmd| self.comparable(cmd) == wanted)
    }

    /// Literal, case-sensitive substring search over stderr.
    pub fn stderr_contains(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Literal, case-sensitive substring search over stdout.
    pub fn stdout_contains(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    fn comparable(&self, line: &str) -> String {
        let line = line.trim();
        if self.normalize_slashes {
            to_forward_slashes(line)
        } else {
            line.to_string()
        }
    }
}

fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}
