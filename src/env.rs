// src/env.rs

//! Environment builder for the task process.
//!
//! The agent hands task inputs to a task through environment variables named
//! `INPUT_<NAME>`. The harness reproduces that convention so a task sees the
//! same variables under test as it would on a real agent.

use std::collections::BTreeMap;

/// Prefix for every input variable.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Variable carrying the path of the mock-response file to the task.
pub const MOCK_RESPONSES_VAR: &str = "MOCK_RESPONSES";

/// Child process environment, ordered so it logs deterministically.
pub type TaskEnv = BTreeMap<String, String>;

/// Translate an input name into its environment variable name.
///
/// Spaces become underscores and the result is uppercased:
/// `"solution file"` -> `INPUT_SOLUTION_FILE`.
pub fn input_env_name(name: &str) -> String {
    format!("{INPUT_PREFIX}{}", name.replace(' ', "_").to_uppercase())
}

/// Base environment every session starts from.
///
/// Only the mock-response path is carried over from the harness process;
/// everything else the task sees comes from its inputs.
pub fn base_env(mock_responses: Option<&str>) -> TaskEnv {
    let mut env = TaskEnv::new();
    if let Some(path) = mock_responses {
        env.insert(MOCK_RESPONSES_VAR.to_string(), path.to_string());
    }
    env
}

/// Overlay `inputs` onto `base`.
///
/// Values are passed through verbatim; an input whose translated name
/// collides with a base variable replaces it.
pub fn build_task_env<'a, I>(base: &TaskEnv, inputs: I) -> TaskEnv
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut env = base.clone();
    for (name, value) in inputs {
        env.insert(input_env_name(name), value.clone());
    }
    env
}
