// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessLauncher` trait and the production
//!   `NodeLauncher`; tests replace it with a fake that replays output.
//! - [`process`] spawns one interpreter process with
//!   `tokio::process::Command` and captures its output.

pub mod backend;
pub mod process;

pub use backend::{CapturedOutput, LaunchOutcome, LaunchRequest, NodeLauncher, ProcessLauncher};
pub use process::run_script;
