//! Configuration type definitions

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::DEFAULT_BENIGN_ERRORS;
use crate::domain::value_objects::ResolverConfig;
use crate::infrastructure::fs::default_state_file;

use super::loader::{self, ConfigError, ConfigWarning};

/// Ignore pattern configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Project-relative ignore file, one fnmatch glob per line
    pub file: String,
    /// Patterns applied to every project
    pub builtin: Vec<String>,
    /// File names starting with this prefix are always ignored
    pub hidden_prefix: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file: ".forceignore".to_string(),
            builtin: ["**.json", ".*", "**.ts", "**.resource"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hidden_prefix: ".".to_string(),
        }
    }
}

/// Deploy command configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Program and arguments; the staging directory is appended
    pub command: Vec<String>,
    /// Project-relative staging directory
    pub staging_dir: String,
    /// Error lines containing one of these are not failures
    pub benign_errors: Vec<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "sfdx".to_string(),
                "force:source:deploy".to_string(),
                "-p".to_string(),
            ],
            staging_dir: "temp".to_string(),
            benign_errors: DEFAULT_BENIGN_ERRORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// State store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Store file; relative paths are resolved against the project
    pub file: Option<PathBuf>,
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub ignore: IgnoreConfig,
    pub deploy: DeployConfig,
    pub state: StateConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Location of the state store for `project_root`.
    pub fn state_file(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        match &self.state.file {
            Some(file) if file.is_absolute() => Ok(file.clone()),
            Some(file) => Ok(project_root.join(file)),
            None => default_state_file().ok_or(ConfigError::NoStateLocation),
        }
    }

    /// Absolute staging directory for `project_root`.
    ///
    /// The directory is deleted before and after every deploy, so only a
    /// project-relative path that stays clear of the source root is used.
    pub fn staging_dir(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        let relative = checked_staging_dir(&self.deploy.staging_dir, &self.resolver.source_root)?;
        Ok(project_root.join(relative))
    }

    /// Reject settings that are only detected once a deploy starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        checked_staging_dir(&self.deploy.staging_dir, &self.resolver.source_root).map(|_| ())
    }
}

fn checked_staging_dir(value: &str, source_root: &str) -> Result<PathBuf, ConfigError> {
    let refuse = |reason: &str| ConfigError::UnsafeStagingDir {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.trim().is_empty() {
        return Err(refuse("it is empty"));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(value).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(refuse("it must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(refuse("it must be relative to the project"))
            }
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(refuse("it is the project directory"));
    }

    let source: PathBuf = Path::new(source_root)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if source.starts_with(&relative) {
        return Err(refuse(&format!(
            "it would delete the source root {:?}",
            source_root
        )));
    }

    Ok(relative)
}
