//! Configuration loading.
//!
//! Sprout reads an optional user-level `~/.sprout/config.yml`, then applies
//! `SPROUT_*` environment overrides. Command-line flags are applied last by
//! the CLI layer.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config, user_config_path};
pub use schema::{SproutConfig, VERSION_PLACEHOLDER};
