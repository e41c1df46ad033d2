// src/sandbox.rs

//! Sandbox staging.
//!
//! A task is executed from a copy under the temp root rather than from its
//! source directory. Staging also provides the mocked task library: it is
//! copied once to `<temp_root>/node_modules`, and any copy of the real
//! library inside the staged task is removed so module resolution falls
//! through to the mock.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::errors::{HarnessError, Result};
use crate::fs::FileSystem;

/// Paths of a staged task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    /// Where the task sources were copied from.
    pub source_path: PathBuf,
    /// Staged copy; the task process runs with this as its cwd.
    pub task_path: PathBuf,
}

/// Stages task directories under a temp root.
#[derive(Debug)]
pub struct SandboxMaterializer<'a> {
    fs: &'a dyn FileSystem,
    tasks_root: &'a Path,
    temp_root: &'a Path,
    mock_task_lib: Option<&'a Path>,
    task_lib_name: &'a str,
}

impl<'a> SandboxMaterializer<'a> {
    /// Fails with [`HarnessError::TempRootNotSet`] when the config has no temp
    /// root.
    pub fn new(fs: &'a dyn FileSystem, config: &'a HarnessConfig) -> Result<Self> {
        let temp_root = config
            .temp_root
            .as_deref()
            .ok_or(HarnessError::TempRootNotSet)?;

        Ok(Self {
            fs,
            tasks_root: &config.tasks_root,
            temp_root,
            mock_task_lib: config.mock_task_lib.as_deref(),
            task_lib_name: &config.task_lib_name,
        })
    }

    pub fn source_path(&self, task: &str) -> PathBuf {
        self.tasks_root.join(task)
    }

    pub fn task_path(&self, task: &str) -> PathBuf {
        self.temp_root.join(task)
    }

    /// Ensure a ready-to-run copy of `task` exists under the temp root.
    ///
    /// Existing sandboxes are reused as-is; only the shadowing task library is
    /// removed on every call.
    pub fn materialize(&self, task: &str) -> Result<Sandbox> {
        let source_path = self.source_path(task);
        if !self.fs.is_dir(&source_path) {
            return Err(HarnessError::TaskNotFound(source_path));
        }

        self.install_mock_task_lib()?;

        let task_path = self.task_path(task);
        if !self.fs.is_dir(&task_path) {
            info!(task, from = ?source_path, to = ?task_path, "staging task sources");
            self.fs
                .copy_dir_all(&source_path, &task_path)
                .map_err(|source| staging(&task_path, source))?;
        } else {
            debug!(task, path = ?task_path, "reusing staged task");
        }

        let shadowing_lib = task_path.join("node_modules").join(self.task_lib_name);
        if self.fs.is_dir(&shadowing_lib) {
            debug!(task, path = ?shadowing_lib, "removing task's own task library");
            self.fs
                .remove_dir_all(&shadowing_lib)
                .map_err(|source| staging(&shadowing_lib, source))?;
        }

        Ok(Sandbox {
            source_path,
            task_path,
        })
    }

    fn install_mock_task_lib(&self) -> Result<()> {
        let Some(mock_lib) = self.mock_task_lib else {
            return Ok(());
        };

        let modules = self.temp_root.join("node_modules");
        if self.fs.is_dir(&modules) {
            return Ok(());
        }

        if !self.fs.is_dir(mock_lib) {
            return Err(HarnessError::ConfigError(format!(
                "mock task library does not exist: {:?}",
                mock_lib
            )));
        }

        info!(from = ?mock_lib, to = ?modules, "installing mock task library");
        let installed = modules.join(self.task_lib_name);
        self.fs
            .create_dir_all(&modules)
            .and_then(|()| self.fs.copy_dir_all(mock_lib, &installed))
            .map_err(|source| staging(&installed, source))?;
        Ok(())
    }
}

fn staging(path: &Path, source: anyhow::Error) -> HarnessError {
    HarnessError::Staging {
        path: path.to_path_buf(),
        source,
    }
}
