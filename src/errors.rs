// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Temp is not defined (set TASK_TEST_TEMP or `temp_root`)")]
    TempRootNotSet,

    #[error("Task does not exist: {0:?} (was it built?)")]
    TaskNotFound(PathBuf),

    #[error("Task json does not exist: {0:?}")]
    ManifestNotFound(PathBuf),

    #[error("Task json is invalid: {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Execution target not specified")]
    MissingExecutionTarget,

    #[error("target does not exist: {0:?}")]
    EntryScriptNotFound(PathBuf),

    #[error("Could not stage {path:?}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("session has already been started")]
    AlreadyStarted,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HarnessError {
    /// Configuration errors are raised before any process is spawned and are
    /// never retried. Filesystem failures while staging count as
    /// configuration errors too.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            HarnessError::Execution(_) | HarnessError::IoError(_) | HarnessError::Other(_)
        )
    }
}

/// Failure delivered on the launcher's completion channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("failed to spawn process: {0}")]
    Spawn(String),

    #[error("process exited with code {code}")]
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("launcher dropped the completion signal without reporting")]
    Dropped,
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, HarnessError>;
