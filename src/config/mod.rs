//! Configuration module for LazyDeploy
//!
//! Configuration hierarchy:
//! 1. Environment variables (LAZYDEPLOY_*)
//! 2. Project config (`<project>/.lazydeploy.toml`)
//! 3. Built-in defaults

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load_for_project, load_with_warnings, with_env_overrides, ConfigError,
    ConfigWarning, CONFIG_FILE_NAME, DEPLOY_COMMAND_ENV, STAGING_DIR_ENV, STATE_FILE_ENV,
};
pub use types::{Config, DeployConfig, IgnoreConfig, StateConfig};
