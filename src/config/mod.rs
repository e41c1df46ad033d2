// src/config/mod.rs

//! Harness configuration.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a file and overlaying the process environment.
//! - `validate.rs`: checks applied when turning raw config into
//!   [`HarnessConfig`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{apply_env_overrides, default_config_path, from_env, load_and_validate, load_from_path};
pub use model::{HarnessConfig, RawHarnessConfig};
