// src/exec/process.rs

//! Running a single task process to completion.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::ExecutionError;

use super::backend::{CapturedOutput, LaunchOutcome, LaunchRequest};

/// Run `<interpreter> <script>` and capture its full output.
///
/// The child gets exactly `request.env`; the harness's own environment is
/// cleared so the task runs isolated. A non-zero exit is reported as
/// [`ExecutionError::NonZeroExit`] with whatever was captured.
pub async fn run_script(interpreter: &str, request: LaunchRequest) -> LaunchOutcome {
    info!(
        task = %request.task,
        interpreter,
        script = ?request.script_path,
        cwd = ?request.working_dir,
        "starting task process"
    );
    debug!(task = %request.task, env = ?request.env, "task environment");

    let mut cmd = Command::new(resolve_program(interpreter));
    cmd.arg(&request.script_path)
        .current_dir(&request.working_dir)
        .env_clear()
        .envs(&request.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // `output()` reads both pipes to EOF before resolving.
    let output = match cmd.output().await {
        Ok(output) => output,
        Err(e) => {
            warn!(task = %request.task, error = %e, "failed to spawn task process");
            return Err(ExecutionError::Spawn(format!(
                "{} {:?}: {}",
                interpreter, request.script_path, e
            )));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !stdout.is_empty() {
        debug!(task = %request.task, "stdout:\n{}", stdout);
    }
    if !stderr.is_empty() {
        debug!(task = %request.task, "stderr:\n{}", stderr);
    }

    let code = output.status.code().unwrap_or(-1);
    info!(
        task = %request.task,
        exit_code = code,
        success = output.status.success(),
        "task process exited"
    );

    if output.status.success() {
        Ok(CapturedOutput { stdout, stderr })
    } else {
        Err(ExecutionError::NonZeroExit {
            code,
            stdout,
            stderr,
        })
    }
}

/// Look a bare program name up on the harness's own `PATH`.
///
/// The child's environment is cleared, and program lookup would otherwise
/// use the child's (empty) `PATH`.
pub fn resolve_program(program: &str) -> PathBuf {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.to_path_buf();
    }

    std::env::var_os("PATH")
        .and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(program))
                .find(|path| path.is_file())
        })
        .unwrap_or_else(|| candidate.to_path_buf())
}
