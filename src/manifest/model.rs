// src/manifest/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{HarnessError, Result};
use crate::types::Runtime;

/// The parts of a task's `task.json` the harness reads.
///
/// ```json
/// {
///   "id": "5bfb729a-a7c8-4a78-a7c3-8d717bb7c13c",
///   "name": "CopyFiles",
///   "execution": {
///     "Node": { "target": "copyfiles.js", "argumentFormat": "" }
///   }
/// }
/// ```
///
/// Everything else in the file is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskManifest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub friendly_name: Option<String>,

    /// Execution targets keyed by runtime (`"Node"`, `"PowerShell"`, ...).
    #[serde(default)]
    pub execution: BTreeMap<String, ExecutionTarget>,
}

impl TaskManifest {
    /// Execution target declared for `runtime`, if any.
    ///
    /// `None` means the task has nothing to run under that runtime, which is
    /// not an error.
    pub fn execution_target(&self, runtime: Runtime) -> Option<&ExecutionTarget> {
        self.execution.get(runtime.manifest_key())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTarget {
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub argument_format: Option<String>,
}

impl ExecutionTarget {
    /// Relative path of the entry script.
    pub fn entry_script(&self) -> Result<&str> {
        match self.target.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => Ok(target),
            _ => Err(HarnessError::MissingExecutionTarget),
        }
    }
}
