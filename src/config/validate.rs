// src/config/validate.rs

use crate::config::model::{HarnessConfig, RawHarnessConfig};
use crate::errors::{HarnessError, Result};

impl TryFrom<RawHarnessConfig> for HarnessConfig {
    type Error = crate::errors::HarnessError;

    fn try_from(raw: RawHarnessConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(HarnessConfig::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawHarnessConfig) -> Result<()> {
    validate_interpreter(cfg)?;
    validate_task_lib_name(cfg)?;
    Ok(())
}

fn validate_interpreter(cfg: &RawHarnessConfig) -> Result<()> {
    if cfg.interpreter.trim().is_empty() {
        return Err(HarnessError::ConfigError(
            "`interpreter` must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_lib_name(cfg: &RawHarnessConfig) -> Result<()> {
    let name = cfg.task_lib_name.trim();
    if name.is_empty() {
        return Err(HarnessError::ConfigError(
            "`task_lib_name` must not be empty".to_string(),
        ));
    }
    // It is joined onto sandbox paths and then removed recursively.
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(HarnessError::ConfigError(format!(
            "`task_lib_name` must be a single directory name (got '{}')",
            name
        )));
    }
    Ok(())
}
