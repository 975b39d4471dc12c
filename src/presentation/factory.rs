//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use tracing::debug;

use crate::application::{DeployOptions, DeployUseCase};
use crate::config::{Config, ConfigError};
use crate::infrastructure::{CommandDeployRunner, GitCli, LocalFs, TomlStateRepository};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase =
    DeployUseCase<GitCli, LocalFs, TomlStateRepository, CommandDeployRunner>;

/// Create a deploy use case for `project_root` with all dependencies wired up
pub fn create_deploy_use_case(
    project_root: &Path,
    config: &Config,
) -> Result<ConcreteDeployUseCase, ConfigError> {
    let state_file = config.state_file(project_root)?;
    debug!(state = %state_file.display(), "using state store");

    Ok(DeployUseCase::new(
        GitCli::new(project_root),
        LocalFs::new(),
        TomlStateRepository::with_path(state_file),
        CommandDeployRunner::new(config.deploy.command.clone(), project_root),
        DeployOptions::from_config(project_root, config)?,
    ))
}
