// tests/env_builder.rs

use std::collections::BTreeMap;

use taskharness::env::{base_env, build_task_env, input_env_name, MOCK_RESPONSES_VAR};

fn inputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_input_env_name_uppercases_and_replaces_spaces() {
    assert_eq!(input_env_name("sourceFolder"), "INPUT_SOURCEFOLDER");
    assert_eq!(input_env_name("solution file"), "INPUT_SOLUTION_FILE");
    assert_eq!(input_env_name("a b c"), "INPUT_A_B_C");
    assert_eq!(input_env_name(""), "INPUT_");
}

#[test]
fn test_build_env_overlays_inputs_on_base() {
    let base = base_env(Some("/tmp/responses.json"));
    let env = build_task_env(
        &base,
        &inputs(&[("contents", "**/*.dll"), ("target folder", "C:\\out; rm -rf")]),
    );

    assert_eq!(env.len(), 3);
    assert_eq!(env[MOCK_RESPONSES_VAR], "/tmp/responses.json");
    assert_eq!(env["INPUT_CONTENTS"], "**/*.dll");
    // Values are passed through without escaping.
    assert_eq!(env["INPUT_TARGET_FOLDER"], "C:\\out; rm -rf");
}

#[test]
fn test_no_inputs_means_base_only() {
    let base = base_env(None);
    let env = build_task_env(&base, &BTreeMap::new());

    assert!(env.is_empty());
}

#[test]
fn test_base_env_without_mock_responses_has_no_entry() {
    assert!(!base_env(None).contains_key(MOCK_RESPONSES_VAR));
}

#[test]
fn test_build_env_does_not_modify_base() {
    let base = base_env(Some("r.json"));
    let _ = build_task_env(&base, &inputs(&[("x", "1")]));

    assert_eq!(base.len(), 1);
}
