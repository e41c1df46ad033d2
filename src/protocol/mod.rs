// src/protocol/mod.rs

//! Output protocol spoken by tasks on stdout.
//!
//! - [`command`] parses `##vso[...]` logging commands.
//! - [`decoder`] folds a whole captured stdout into a
//!   [`ResultState`](crate::result::ResultState), recognising both logging
//!   commands and `[command]` tool-invocation lines.

pub mod command;
pub mod decoder;

pub use command::{COMMAND_PREFIX, TaskCommand};
pub use decoder::{TOOL_INVOCATION_MARKER, decode_line, process_output};
