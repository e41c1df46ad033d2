// src/session/mod.rs

//! Test sessions.
//!
//! A [`TaskRunner`] moves through
//! `Configuring -> Starting -> Running -> Completed | Failed`:
//!
//! - `Configuring`: inputs can be registered.
//! - `Starting`: [`preflight`] stages the sandbox and validates the
//!   manifest; failures here are fatal and returned synchronously.
//! - `Running`: the launcher owns the process; the session awaits its single
//!   completion signal.
//! - `Completed`: output was captured and decoded into the result state.
//! - `Failed`: the launcher reported an execution error.
//!
//! Decoding only ever runs after the completion signal arrived, so the result
//! state needs no locking.

pub mod preflight;
pub mod runner;

pub use runner::TaskRunner;
