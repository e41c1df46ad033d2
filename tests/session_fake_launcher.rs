// tests/session_fake_launcher.rs

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use taskharness::errors::{ExecutionError, HarnessError};
use taskharness::fs::mock::MockFileSystem;
use taskharness::fs::FileSystem;
use taskharness::session::TaskRunner;
use taskharness::types::{SessionEvent, SessionState};
use taskharness_test_utils::builders::{mock_task, node_manifest, powershell_only_manifest, ConfigBuilder};
use taskharness_test_utils::fake_launcher::{FakeLauncher, SilentLauncher};
use taskharness_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const TASKS_ROOT: &str = "/repo/Tasks";
const TEMP_ROOT: &str = "/repo/_temp";

/// A mock filesystem holding one Node task `CopyFiles` with entry `copy.js`.
fn copy_files_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    mock_task(
        &fs,
        Path::new(TASKS_ROOT),
        "CopyFiles",
        Some(&node_manifest("copy.js")),
        &[("copy.js", "// task")],
    );
    fs
}

fn runner(fs: &MockFileSystem) -> TaskRunner {
    let config = ConfigBuilder::new()
        .tasks_root(TASKS_ROOT)
        .temp_root(TEMP_ROOT)
        .mock_responses("/repo/responses.json")
        .build();
    TaskRunner::new("CopyFiles", config).with_filesystem(Arc::new(fs.clone()))
}

#[tokio::test]
async fn test_run_decodes_launcher_output() -> TestResult {
    init_tracing();
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut launcher = FakeLauncher::new().with_output(
        "[command]/usr/bin/cp a b\n##vso[task.complete result=Succeeded]Done\n",
        "",
    );

    assert!(!runner.state().is_finished());
    runner.run(&mut launcher).await?;

    assert_eq!(runner.state(), SessionState::Completed);
    assert!(runner.state().is_finished());
    let result = runner.result();
    assert!(result.succeeded);
    assert!(result.result_was_set);
    assert_eq!(result.invoked_command_count(), 1);
    assert!(runner.ran("/usr/bin/cp a b"));
    Ok(())
}

#[tokio::test]
async fn test_launch_request_carries_sandbox_and_env() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    runner.set_input("Source Folder", "/src");
    runner.set_input("contents", "**");
    let mut launcher = FakeLauncher::new();

    runner.run(&mut launcher).await?;

    let launched = launcher.launched();
    assert_eq!(launched.len(), 1);
    let request = &launched[0];
    assert_eq!(request.task, "CopyFiles");
    assert_eq!(request.working_dir, PathBuf::from("/repo/_temp/CopyFiles"));
    assert_eq!(request.script_path, PathBuf::from("/repo/_temp/CopyFiles/copy.js"));
    assert_eq!(request.env.len(), 3);
    assert_eq!(request.env["INPUT_SOURCE_FOLDER"], "/src");
    assert_eq!(request.env["INPUT_CONTENTS"], "**");
    assert_eq!(request.env["MOCK_RESPONSES"], "/repo/responses.json");
    assert_eq!(runner.task_env(), &request.env);

    let sandbox = runner.sandbox().unwrap();
    assert_eq!(sandbox.source_path, PathBuf::from("/repo/Tasks/CopyFiles"));
    assert!(fs.is_file(Path::new("/repo/_temp/CopyFiles/copy.js")));
    Ok(())
}

#[tokio::test]
async fn test_no_node_target_completes_without_launch() -> TestResult {
    let fs = MockFileSystem::new();
    mock_task(
        &fs,
        Path::new(TASKS_ROOT),
        "CopyFiles",
        Some(&powershell_only_manifest()),
        &[],
    );
    let mut runner = runner(&fs);
    let mut events = runner.subscribe();
    let mut launcher = FakeLauncher::new().with_output("[command]never", "");

    runner.run(&mut launcher).await?;

    assert!(launcher.launched().is_empty());
    assert_eq!(runner.state(), SessionState::Completed);
    assert_eq!(runner.result().invoked_command_count(), 0);
    assert!(runner.result().succeeded);
    assert!(!runner.result().result_was_set);
    assert!(runner.manifest().is_some());

    assert!(matches!(events.recv().await, Some(SessionEvent::Starting { .. })));
    assert!(matches!(events.recv().await, Some(SessionEvent::Completed { .. })));
    Ok(())
}

#[tokio::test]
async fn test_execution_error_keeps_optimistic_defaults() {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut events = runner.subscribe();
    let mut launcher = FakeLauncher::new().with_error(ExecutionError::NonZeroExit {
        code: 2,
        stdout: "##vso[task.complete result=Failed]boom\n".to_string(),
        stderr: "stack trace".to_string(),
    });

    let err = runner.run(&mut launcher).await.unwrap_err();

    match err {
        HarnessError::Execution(ExecutionError::NonZeroExit { code, .. }) => assert_eq!(code, 2),
        other => panic!("expected execution error, got {other:?}"),
    }
    assert_eq!(runner.state(), SessionState::Failed);
    // Output of a failed process is not decoded.
    assert!(runner.result().succeeded);
    assert!(!runner.result().failed);
    assert!(!runner.result().result_was_set);
    assert_eq!(runner.result().stderr, "");

    assert!(matches!(events.recv().await, Some(SessionEvent::Starting { .. })));
    match events.recv().await {
        Some(SessionEvent::Failed { task, error }) => {
            assert_eq!(task, "CopyFiles");
            assert!(error.contains("code 2"));
        }
        other => panic!("expected Failed event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dropped_completion_is_an_execution_error() {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);

    let err = runner.run(&mut SilentLauncher).await.unwrap_err();

    assert!(matches!(err, HarnessError::Execution(ExecutionError::Dropped)));
    assert!(!err.is_configuration());
    assert_eq!(runner.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_session_runs_only_once() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut launcher = FakeLauncher::new()
        .with_output("##vso[task.complete result=Failed]x", "")
        .with_output("##vso[task.complete result=Succeeded]y", "");

    runner.run(&mut launcher).await?;
    let err = runner.run(&mut launcher).await.unwrap_err();

    assert!(matches!(err, HarnessError::AlreadyStarted));
    assert_eq!(launcher.launched().len(), 1);
    assert!(runner.result().failed);
    Ok(())
}

#[tokio::test]
async fn test_inputs_after_start_are_ignored() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    runner.set_input("early", "1");
    let mut launcher = FakeLauncher::new();

    runner.run(&mut launcher).await?;
    runner.set_input("late", "2");

    assert_eq!(runner.inputs().len(), 1);
    assert!(!runner.task_env().contains_key("INPUT_LATE"));
    Ok(())
}

#[tokio::test]
async fn test_ignore_slashes_mode_from_builder() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs).with_ignore_slashes(true);
    let mut launcher =
        FakeLauncher::new().with_output("[command]C:\\tools\\foo.exe bar\n", "");

    runner.run(&mut launcher).await?;

    assert!(runner.ran("C:/tools/foo.exe bar"));
    assert!(runner.ran("C:\\tools\\foo.exe bar"));
    Ok(())
}

#[tokio::test]
async fn test_stderr_query_on_session() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut launcher = FakeLauncher::new().with_output("", "Error: cannot find module 'x'");

    runner.run(&mut launcher).await?;

    assert!(runner.stderr_contained("cannot find module"));
    assert!(!runner.stderr_contained("CANNOT"));
    Ok(())
}

#[tokio::test]
async fn test_events_in_order_for_successful_run() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut first = runner.subscribe();
    let second = runner.subscribe();
    drop(second);
    let mut launcher = FakeLauncher::new();

    runner.run(&mut launcher).await?;

    assert_eq!(
        first.recv().await,
        Some(SessionEvent::Starting {
            task: "CopyFiles".to_string()
        })
    );
    assert_eq!(
        first.recv().await,
        Some(SessionEvent::Completed {
            task: "CopyFiles".to_string()
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_switching_slash_mode_after_run_keeps_result() -> TestResult {
    let fs = copy_files_fs();
    let mut runner = runner(&fs);
    let mut launcher = FakeLauncher::new().with_output(
        "[command]C:\\tools\\foo.exe bar\n##vso[task.complete result=Failed]x\n",
        "",
    );
    runner.run(&mut launcher).await?;
    assert!(!runner.ran("C:/tools/foo.exe bar"));

    let runner = runner.with_ignore_slashes(true);

    assert_eq!(runner.result().invoked_command_count(), 1);
    assert!(runner.result().failed);
    assert!(runner.ran("C:/tools/foo.exe bar"));
    assert!(runner.ran("C:\\tools\\foo.exe bar"));
    Ok(())
}
