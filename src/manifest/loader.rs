// src/manifest/loader.rs

use std::path::{Path, PathBuf};

use crate::errors::{HarnessError, Result};
use crate::fs::FileSystem;
use crate::manifest::model::TaskManifest;

/// File name of the task manifest inside a task directory.
pub const MANIFEST_FILE: &str = "task.json";

pub fn manifest_path(task_dir: &Path) -> PathBuf {
    task_dir.join(MANIFEST_FILE)
}

/// Read and parse `task.json` from `task_dir`.
pub fn load_manifest(fs: &dyn FileSystem, task_dir: &Path) -> Result<TaskManifest> {
    let path = manifest_path(task_dir);
    if !fs.is_file(&path) {
        return Err(HarnessError::ManifestNotFound(path));
    }

    let contents = match fs.read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(HarnessError::Staging { path, source }),
    };
    parse_manifest(&contents).map_err(|source| HarnessError::ManifestParse { path, source })
}

/// Parse manifest JSON text.
///
/// Task manifests are sometimes saved with a UTF-8 byte-order mark, which
/// `serde_json` rejects, so it is stripped first.
pub fn parse_manifest(contents: &str) -> serde_json::Result<TaskManifest> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    serde_json::from_str(contents)
}
