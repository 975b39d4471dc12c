//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::config::{Config, ConfigError, DeployConfig, IgnoreConfig};
use crate::domain::value_objects::ResolverConfig;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Project directory; git runs here and paths are relative to it
    pub project_root: PathBuf,
    /// Absolute staging directory, recreated on every deploy
    pub staging_dir: PathBuf,
    pub resolver: ResolverConfig,
    pub ignore: IgnoreConfig,
    /// Deploy output fragments that do not count as errors
    pub benign_errors: Vec<String>,
}

impl DeployOptions {
    /// Default options for `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let deploy = DeployConfig::default();
        Self {
            staging_dir: project_root.join(&deploy.staging_dir),
            project_root,
            resolver: ResolverConfig::default(),
            ignore: IgnoreConfig::default(),
            benign_errors: deploy.benign_errors,
        }
    }

    pub fn from_config(
        project_root: impl Into<PathBuf>,
        config: &Config,
    ) -> Result<Self, ConfigError> {
        let project_root = project_root.into();
        Ok(Self {
            staging_dir: config.staging_dir(&project_root)?,
            project_root,
            resolver: config.resolver.clone(),
            ignore: config.ignore.clone(),
            benign_errors: config.deploy.benign_errors.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_dir_defaults_inside_project() {
        let options = DeployOptions::new("/work/project");
        assert_eq!(options.staging_dir, PathBuf::from("/work/project/temp"));
        assert_eq!(options.resolver.source_root, "src");
    }

    #[test]
    fn from_config_uses_configured_values() {
        let mut config = Config::default();
        config.deploy.staging_dir = ".stage".to_string();
        config.deploy.benign_errors = vec!["flaky".to_string()];

        let options = DeployOptions::from_config("/p", &config).unwrap();

        assert_eq!(options.staging_dir, PathBuf::from("/p/.stage"));
        assert_eq!(options.benign_errors, vec!["flaky"]);
    }

    #[test]
    fn from_config_refuses_staging_over_sources() {
        let mut config = Config::default();
        config.deploy.staging_dir = "src".to_string();

        let err = DeployOptions::from_config("/p", &config).unwrap_err();

        assert!(matches!(err, ConfigError::UnsafeStagingDir { .. }));
    }
}
