// tests/output_decoder.rs

use taskharness::protocol::{decode_line, process_output};
use taskharness::result::ResultState;

fn decode(stdout: &str, normalize: bool) -> ResultState {
    let mut state = ResultState::new(normalize);
    process_output(&mut state, stdout, "");
    state
}

#[test]
fn test_defaults_without_completion_command() {
    let state = decode("hello\nworld\n", false);

    assert!(state.succeeded);
    assert!(!state.failed);
    assert!(!state.result_was_set);
    assert_eq!(state.invoked_command_count(), 0);
    assert!(state.invoked_commands().is_empty());
    assert_eq!(state.stdout, "hello\nworld\n");
}

#[test]
fn test_empty_stdout_changes_nothing() {
    let state = decode("", true);

    assert_eq!(state, ResultState::new(true));
}

#[test]
fn test_succeeded_completion_sets_result() {
    let state = decode("##vso[task.complete result=Succeeded]Done", false);

    assert!(state.succeeded);
    assert!(!state.failed);
    assert!(state.result_was_set);
}

#[test]
fn test_failed_completion_sets_result() {
    let state = decode("starting\n##vso[task.complete result=Failed]Oops\n", false);

    assert!(!state.succeeded);
    assert!(state.failed);
    assert!(state.result_was_set);
}

#[test]
fn test_last_completion_command_wins() {
    let stdout = "##vso[task.complete result=Failed]Oops\n\
                  some output\n\
                  ##vso[task.complete result=Succeeded]Retry\n";
    let state = decode(stdout, false);

    assert!(state.succeeded);
    assert!(!state.failed);
    assert!(state.result_was_set);

    let stdout = "##vso[task.complete result=Succeeded]first\n\
                  ##vso[task.complete result=Failed]second\n";
    let state = decode(stdout, false);

    assert!(state.failed);
    assert!(!state.succeeded);
}

#[test]
fn test_unrecognised_result_is_ignored() {
    let state = decode("##vso[task.complete result=SucceededWithIssues]meh\n", false);
    assert!(state.succeeded);
    assert!(!state.result_was_set);

    // An earlier explicit result survives an unrecognised one.
    let state = decode(
        "##vso[task.complete result=Failed]no\n##vso[task.complete result=failed]lowercase\n",
        false,
    );
    assert!(state.failed);
    assert!(state.result_was_set);
}

#[test]
fn test_completion_without_result_property_is_ignored() {
    let state = decode("##vso[task.complete]Done\n", false);

    assert!(state.succeeded);
    assert!(!state.result_was_set);
}

#[test]
fn test_other_commands_are_inert() {
    let state = decode(
        "##vso[task.setvariable variable=result]Failed\n##vso[task.debug result=Failed]x\n",
        false,
    );

    assert!(state.succeeded);
    assert!(!state.result_was_set);
}

#[test]
fn test_tool_invocations_are_recorded_in_order() {
    let stdout = "[command]git status\n\
                  noise\n\
                  prefix [command]  msbuild /t:Build  \n\
                  [command]git status\n";
    let state = decode(stdout, false);

    assert_eq!(state.invoked_command_count(), 3);
    assert_eq!(
        state.invoked_commands(),
        ["git status", "msbuild /t:Build", "git status"]
    );
}

#[test]
fn test_trailing_newline_is_not_an_invocation() {
    let state = decode("[command]echo hi\n", false);

    assert_eq!(state.invoked_command_count(), 1);
    assert_eq!(state.invoked_commands(), ["echo hi"]);
}

#[test]
fn test_crlf_output_is_trimmed() {
    let state = decode(
        "[command]tool arg\r\n##vso[task.complete result=Failed]bad\r\n",
        false,
    );

    assert_eq!(state.invoked_commands(), ["tool arg"]);
    assert!(state.failed);
}

#[test]
fn test_slashes_normalised_when_enabled() {
    let state = decode("[command]C:\\tools\\foo.exe bar", true);

    assert_eq!(state.invoked_commands(), ["C:/tools/foo.exe bar"]);
    assert!(state.was_command_invoked("C:/tools/foo.exe bar"));
    assert!(state.was_command_invoked("C:\\tools\\foo.exe bar"));
}

#[test]
fn test_slashes_kept_when_disabled() {
    let state = decode("[command]C:\\tools\\foo.exe bar", false);

    assert_eq!(state.invoked_commands(), ["C:\\tools\\foo.exe bar"]);
    assert!(state.was_command_invoked("C:\\tools\\foo.exe bar"));
    assert!(!state.was_command_invoked("C:/tools/foo.exe bar"));
}

#[test]
fn test_line_with_marker_and_command_applies_both() {
    let mut state = ResultState::new(false);
    decode_line(
        &mut state,
        "[command]node x.js ##vso[task.complete result=Failed]",
    );

    assert_eq!(state.invoked_command_count(), 1);
    assert!(state.failed);
}

#[test]
fn test_stderr_is_captured_but_not_decoded() {
    let mut state = ResultState::new(false);
    process_output(
        &mut state,
        "",
        "[command]hidden\n##vso[task.complete result=Failed]x\n",
    );

    assert_eq!(state.invoked_command_count(), 0);
    assert!(state.succeeded);
    assert!(state.stderr_contains("[command]hidden"));
}
