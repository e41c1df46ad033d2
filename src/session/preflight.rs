// src/session/preflight.rs

//! Run-start checks.
//!
//! Everything here happens before a process is spawned, and every failure is
//! a configuration error. The order mirrors what a task needs: a temp root,
//! its sources, a staged sandbox, a manifest, and finally an entry script.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::env::TaskEnv;
use crate::errors::{HarnessError, Result};
use crate::exec::LaunchRequest;
use crate::fs::FileSystem;
use crate::manifest::{TaskManifest, load_manifest};
use crate::sandbox::{Sandbox, SandboxMaterializer};
use crate::types::Runtime;

/// Outcome of a successful preflight.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub sandbox: Sandbox,
    pub manifest: TaskManifest,
    /// `None` when the manifest has no Node execution target.
    pub launch: Option<LaunchRequest>,
}

/// Stage `task`, read its manifest and resolve the process to launch.
pub fn prepare(
    fs: &dyn FileSystem,
    config: &HarnessConfig,
    task: &str,
    env: TaskEnv,
) -> Result<Prepared> {
    let materializer = SandboxMaterializer::new(fs, config)?;
    let sandbox = materializer.materialize(task)?;
    let manifest = load_manifest(fs, &sandbox.task_path)?;

    let Some(target) = manifest.execution_target(Runtime::Node) else {
        info!(task, runtime = %Runtime::Node, "task declares no execution target; nothing to run");
        return Ok(Prepared {
            sandbox,
            manifest,
            launch: None,
        });
    };

    let script_path = sandbox.task_path.join(target.entry_script()?);
    if !fs.is_file(&script_path) {
        return Err(HarnessError::EntryScriptNotFound(script_path));
    }
    debug!(task, script = ?script_path, "resolved entry script");

    let launch = LaunchRequest {
        task: task.to_string(),
        working_dir: absolute(sandbox.task_path.clone())?,
        script_path: absolute(script_path)?,
        env,
    };

    Ok(Prepared {
        sandbox,
        manifest,
        launch: Some(launch),
    })
}

// The child runs with the sandbox as cwd, so a relative script path would
// resolve against the wrong directory.
fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    std::path::absolute(&path).map_err(|source| HarnessError::Staging {
        path,
        source: source.into(),
    })
}
