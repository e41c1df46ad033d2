#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use taskharness::config::{HarnessConfig, RawHarnessConfig};
use taskharness::fs::mock::MockFileSystem;
use tempfile::TempDir;

/// `task.json` text declaring a Node execution target.
pub fn node_manifest(target: &str) -> String {
    json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "name": "FixtureTask",
        "friendlyName": "Fixture task",
        "execution": {
            "Node": { "target": target, "argumentFormat": "" }
        }
    })
    .to_string()
}

/// `task.json` text with no Node execution target.
pub fn powershell_only_manifest() -> String {
    json!({
        "name": "FixtureTask",
        "execution": {
            "PowerShell": { "target": "$(currentDirectory)\\task.ps1" }
        }
    })
    .to_string()
}

/// Builder for `HarnessConfig` to simplify test setup.
pub struct ConfigBuilder {
    config: RawHarnessConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawHarnessConfig::default(),
        }
    }

    pub fn tasks_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tasks_root = path.into();
        self
    }

    pub fn temp_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_root = Some(path.into());
        self
    }

    pub fn no_temp_root(mut self) -> Self {
        self.config.temp_root = None;
        self
    }

    pub fn mock_responses(mut self, path: &str) -> Self {
        self.config.mock_responses = Some(path.to_string());
        self
    }

    pub fn mock_task_lib(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.mock_task_lib = Some(path.into());
        self
    }

    pub fn interpreter(mut self, interpreter: &str) -> Self {
        self.config.interpreter = interpreter.to_string();
        self
    }

    pub fn ignore_slashes(mut self, val: bool) -> Self {
        self.config.ignore_slashes = val;
        self
    }

    pub fn raw(self) -> RawHarnessConfig {
        self.config
    }

    pub fn build(self) -> HarnessConfig {
        HarnessConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a task laid out on disk in a temporary directory:
///
/// ```text
/// <tmp>/Tasks/<name>/task.json
/// <tmp>/Tasks/<name>/<files...>
/// <tmp>/Temp/
/// ```
pub struct TaskFixtureBuilder {
    name: String,
    manifest: Option<String>,
    files: Vec<(String, String)>,
}

impl TaskFixtureBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            manifest: Some(node_manifest("index.sh")),
            files: Vec::new(),
        }
    }

    pub fn manifest(mut self, json: impl Into<String>) -> Self {
        self.manifest = Some(json.into());
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    pub fn file(mut self, rel: &str, contents: &str) -> Self {
        self.files.push((rel.to_string(), contents.to_string()));
        self
    }

    /// Shorthand for an `index.sh` entry script (run it with `sh`).
    pub fn script(self, contents: &str) -> Self {
        self.file("index.sh", contents)
    }

    pub fn build(self) -> TaskFixture {
        let dir = tempfile::tempdir().expect("create temp dir");
        let tasks_root = dir.path().join("Tasks");
        let temp_root = dir.path().join("Temp");
        let task_dir = tasks_root.join(&self.name);

        fs::create_dir_all(&task_dir).expect("create task dir");
        fs::create_dir_all(&temp_root).expect("create temp root");

        if let Some(manifest) = &self.manifest {
            fs::write(task_dir.join("task.json"), manifest).expect("write task.json");
        }
        for (rel, contents) in &self.files {
            let path = task_dir.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent dir");
            }
            fs::write(path, contents).expect("write task file");
        }

        TaskFixture {
            dir,
            name: self.name,
            tasks_root,
            temp_root,
        }
    }
}

/// A task on disk; the directory is removed when this is dropped.
pub struct TaskFixture {
    dir: TempDir,
    pub name: String,
    pub tasks_root: PathBuf,
    pub temp_root: PathBuf,
}

impl TaskFixture {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Config pointing at this fixture, interpreting scripts with `sh`.
    pub fn config(&self) -> ConfigBuilder {
        ConfigBuilder::new()
            .tasks_root(&self.tasks_root)
            .temp_root(&self.temp_root)
            .interpreter("sh")
    }

    pub fn staged_path(&self) -> PathBuf {
        self.temp_root.join(&self.name)
    }
}

/// Lay out a task in a `MockFileSystem` under `tasks_root`.
pub fn mock_task(
    fs: &MockFileSystem,
    tasks_root: &Path,
    name: &str,
    manifest: Option<&str>,
    files: &[(&str, &str)],
) -> PathBuf {
    let task_dir = tasks_root.join(name);
    fs.add_dir(&task_dir);
    if let Some(manifest) = manifest {
        fs.add_file(task_dir.join("task.json"), manifest.as_bytes());
    }
    for (rel, contents) in files {
        fs.add_file(task_dir.join(rel), contents.as_bytes());
    }
    task_dir
}
