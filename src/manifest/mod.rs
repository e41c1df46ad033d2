// src/manifest/mod.rs

//! Typed, read-only view of a task's `task.json`.

pub mod loader;
pub mod model;

pub use loader::{MANIFEST_FILE, load_manifest, manifest_path, parse_manifest};
pub use model::{ExecutionTarget, TaskManifest};
