// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{HarnessConfig, RawHarnessConfig};
use crate::errors::Result;

/// Sandbox root; required once a session starts.
pub const TEMP_ROOT_VAR: &str = "TASK_TEST_TEMP";
/// Directory holding task sources.
pub const TASKS_ROOT_VAR: &str = "TASK_TEST_ROOT";
/// Mock-response file forwarded to the task.
pub const MOCK_RESPONSES_VAR: &str = crate::env::MOCK_RESPONSES_VAR;

/// Load a configuration file and return the raw `RawHarnessConfig`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the checked config.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawHarnessConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawHarnessConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, apply environment overrides, and
/// validate.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<HarnessConfig> {
    let mut raw_config = load_from_path(&path)?;
    apply_env_overrides(&mut raw_config);
    let config = HarnessConfig::try_from(raw_config)?;
    Ok(config)
}

/// Config taken purely from the process environment, on top of defaults.
pub fn from_env() -> Result<HarnessConfig> {
    let mut raw_config = RawHarnessConfig::default();
    apply_env_overrides(&mut raw_config);
    HarnessConfig::try_from(raw_config)
}

/// Overlay `TASK_TEST_TEMP`, `TASK_TEST_ROOT` and `MOCK_RESPONSES` from the
/// process environment. Environment values win over the file.
pub fn apply_env_overrides(raw: &mut RawHarnessConfig) {
    apply_env_overrides_with(raw, |key| std::env::var(key).ok());
}

/// Same as [`apply_env_overrides`] with an explicit variable lookup.
pub fn apply_env_overrides_with<F>(raw: &mut RawHarnessConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(temp) = lookup(TEMP_ROOT_VAR) {
        raw.temp_root = Some(PathBuf::from(temp));
    }
    if let Some(root) = lookup(TASKS_ROOT_VAR) {
        raw.tasks_root = PathBuf::from(root);
    }
    if let Some(responses) = lookup(MOCK_RESPONSES_VAR) {
        raw.mock_responses = Some(responses);
    }
}

/// Default config location: `Harness.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Harness.toml")
}
