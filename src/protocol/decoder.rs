// src/protocol/decoder.rs

//! Folds captured task stdout into a [`ResultState`].

use tracing::{debug, trace};

use crate::protocol::command::{COMMAND_PREFIX, TaskCommand};
use crate::result::ResultState;

/// Marker the mocked task library prints before each tool command line.
pub const TOOL_INVOCATION_MARKER: &str = "[command]";

/// Command that reports the task result.
pub const COMPLETE_COMMAND: &str = "task.complete";

pub const RESULT_PROPERTY: &str = "result";
pub const RESULT_SUCCEEDED: &str = "Succeeded";
pub const RESULT_FAILED: &str = "Failed";

/// Decode captured output into `state`.
///
/// Stores `stdout`/`stderr` verbatim, then walks stdout line by line. Each
/// line is checked independently for a tool-invocation marker and for a
/// logging command; later `task.complete` commands override earlier ones.
pub fn process_output(state: &mut ResultState, stdout: &str, stderr: &str) {
    state.stdout = stdout.to_string();
    state.stderr = stderr.to_string();

    for line in stdout.split('\n') {
        decode_line(state, line);
    }
}

/// Apply a single stdout line to `state`.
pub fn decode_line(state: &mut ResultState, line: &str) {
    if let Some(pos) = line.find(TOOL_INVOCATION_MARKER) {
        let command_line = &line[pos + TOOL_INVOCATION_MARKER.len()..];
        trace!(command = %command_line.trim(), "tool invocation");
        state.record_invocation(command_line);
    }

    if line.contains(COMMAND_PREFIX) {
        if let Some(cmd) = TaskCommand::parse(line) {
            apply_command(state, &cmd);
        }
    }
}

fn apply_command(state: &mut ResultState, cmd: &TaskCommand) {
    if cmd.command != COMPLETE_COMMAND {
        return;
    }

    match cmd.property(RESULT_PROPERTY) {
        Some(RESULT_FAILED) => {
            debug!(message = %cmd.message, "task reported failure");
            state.mark_failed();
        }
        Some(RESULT_SUCCEEDED) => {
            debug!(message = %cmd.message, "task reported success");
            state.mark_succeeded();
        }
        other => {
            debug!(result = ?other, "ignoring task.complete with unrecognised result");
        }
    }
}
