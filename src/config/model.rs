// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Harness configuration as read from a TOML file.
///
/// ```toml
/// tasks_root = "Tasks"
/// temp_root = "_build/Temp"
/// mock_responses = "Tests/responses.json"
/// mock_task_lib = "Tests/lib/node_modules/vsts-task-lib"
/// interpreter = "node"
/// ```
///
/// Every key is optional. `temp_root` may be left out of the file and come
/// from `TASK_TEST_TEMP` instead; a missing temp root is only an error once a
/// session actually starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHarnessConfig {
    /// Directory holding one sub-directory of sources per task.
    #[serde(default = "default_tasks_root")]
    pub tasks_root: PathBuf,

    /// Root under which sandboxes are staged.
    #[serde(default)]
    pub temp_root: Option<PathBuf>,

    /// Mock-response file handed to the task as `MOCK_RESPONSES`.
    #[serde(default)]
    pub mock_responses: Option<String>,

    /// Mocked task library copied into `<temp_root>/node_modules`.
    #[serde(default)]
    pub mock_task_lib: Option<PathBuf>,

    /// Directory name of the task library inside `node_modules`.
    #[serde(default = "default_task_lib_name")]
    pub task_lib_name: String,

    /// Program used to interpret the entry script.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Compare recorded command lines ignoring `\` vs `/`.
    #[serde(default)]
    pub ignore_slashes: bool,
}

fn default_tasks_root() -> PathBuf {
    PathBuf::from("Tasks")
}

fn default_task_lib_name() -> String {
    "vsts-task-lib".to_string()
}

fn default_interpreter() -> String {
    "node".to_string()
}

impl Default for RawHarnessConfig {
    fn default() -> Self {
        Self {
            tasks_root: default_tasks_root(),
            temp_root: None,
            mock_responses: None,
            mock_task_lib: None,
            task_lib_name: default_task_lib_name(),
            interpreter: default_interpreter(),
            ignore_slashes: false,
        }
    }
}

/// Validated harness configuration.
///
/// Only constructible through `TryFrom<RawHarnessConfig>`, so holding one
/// means the checks in [`validate`](super::validate) passed.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub tasks_root: PathBuf,
    pub temp_root: Option<PathBuf>,
    pub mock_responses: Option<String>,
    pub mock_task_lib: Option<PathBuf>,
    pub task_lib_name: String,
    pub interpreter: String,
    pub ignore_slashes: bool,
}

impl HarnessConfig {
    pub(crate) fn new_unchecked(raw: RawHarnessConfig) -> Self {
        Self {
            tasks_root: raw.tasks_root,
            temp_root: raw.temp_root,
            mock_responses: raw.mock_responses,
            mock_task_lib: raw.mock_task_lib,
            task_lib_name: raw.task_lib_name,
            interpreter: raw.interpreter,
            ignore_slashes: raw.ignore_slashes,
        }
    }
}
