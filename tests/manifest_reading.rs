// tests/manifest_reading.rs

use std::path::Path;

use taskharness::errors::HarnessError;
use taskharness::fs::mock::MockFileSystem;
use taskharness::manifest::{load_manifest, parse_manifest};
use taskharness::types::Runtime;

const COPY_FILES: &str = r#"{
  "id": "5bfb729a-a7c8-4a78-a7c3-8d717bb7c13c",
  "name": "CopyFiles",
  "friendlyName": "Copy Files",
  "category": "Utility",
  "inputs": [ { "name": "SourceFolder", "type": "filePath" } ],
  "execution": {
    "Node": { "target": "copyfiles.js", "argumentFormat": "" },
    "PowerShell": { "target": "$(currentDirectory)\\CopyFiles.ps1" }
  }
}"#;

#[test]
fn test_parse_reads_known_fields_and_ignores_rest() {
    let manifest = parse_manifest(COPY_FILES).unwrap();

    assert_eq!(manifest.name.as_deref(), Some("CopyFiles"));
    assert_eq!(manifest.friendly_name.as_deref(), Some("Copy Files"));
    assert_eq!(manifest.execution.len(), 2);
}

#[test]
fn test_execution_target_lookup_by_runtime() {
    let manifest = parse_manifest(COPY_FILES).unwrap();

    let node = manifest.execution_target(Runtime::Node).unwrap();
    assert_eq!(node.entry_script().unwrap(), "copyfiles.js");
    assert_eq!(node.argument_format.as_deref(), Some(""));

    let ps = manifest.execution_target(Runtime::PowerShell).unwrap();
    assert_eq!(ps.entry_script().unwrap(), "$(currentDirectory)\\CopyFiles.ps1");
}

#[test]
fn test_missing_runtime_is_none() {
    let manifest = parse_manifest(r#"{ "name": "PsOnly", "execution": { "PowerShell": { "target": "x.ps1" } } }"#).unwrap();
    assert!(manifest.execution_target(Runtime::Node).is_none());

    let manifest = parse_manifest("{}").unwrap();
    assert!(manifest.execution.is_empty());
    assert!(manifest.execution_target(Runtime::Node).is_none());
}

#[test]
fn test_byte_order_mark_is_accepted() {
    let text = format!("\u{feff}{}", COPY_FILES);

    let manifest = parse_manifest(&text).unwrap();

    assert!(manifest.execution_target(Runtime::Node).is_some());
}

#[test]
fn test_load_manifest_from_filesystem() {
    let fs = MockFileSystem::new();
    fs.add_file("/t/CopyFiles/task.json", COPY_FILES);

    let manifest = load_manifest(&fs, Path::new("/t/CopyFiles")).unwrap();

    assert_eq!(manifest.id.as_deref(), Some("5bfb729a-a7c8-4a78-a7c3-8d717bb7c13c"));
}

#[test]
fn test_load_manifest_errors() {
    let fs = MockFileSystem::new();
    fs.add_file("/t/Broken/task.json", "not json");
    fs.add_dir("/t/Empty");

    assert!(matches!(
        load_manifest(&fs, Path::new("/t/Empty")),
        Err(HarnessError::ManifestNotFound(_))
    ));
    assert!(matches!(
        load_manifest(&fs, Path::new("/t/Broken")),
        Err(HarnessError::ManifestParse { .. })
    ));
}
