//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::Config;

/// Project config file name
pub const CONFIG_FILE_NAME: &str = ".lazydeploy.toml";

pub const STATE_FILE_ENV: &str = "LAZYDEPLOY_STATE_FILE";
pub const DEPLOY_COMMAND_ENV: &str = "LAZYDEPLOY_DEPLOY_COMMAND";
pub const STAGING_DIR_ENV: &str = "LAZYDEPLOY_STAGING_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("cannot locate the state file: no home directory and no state.file configured")]
    NoStateLocation,

    #[error("refusing staging directory {value:?}: {reason}")]
    UnsafeStagingDir { value: String, reason: String },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `<project_root>/.lazydeploy.toml`, or defaults when it is absent,
/// then apply environment overrides.
pub fn load_for_project(project_root: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let path = project_root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if path.is_file() {
        debug!(path = %path.display(), "loading project config");
        load_with_warnings(&path)?
    } else {
        (Config::default(), Vec::new())
    };

    let config = with_env_overrides(config);
    config.validate()?;
    Ok((config, warnings))
}

/// Apply environment variable overrides (LAZYDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `get_env`.
pub fn apply_env_overrides<F>(mut config: Config, get_env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(file) = get_env(STATE_FILE_ENV).filter(|v| !v.trim().is_empty()) {
        config.state.file = Some(PathBuf::from(file));
    }

    // Whitespace-separated; quoting is not supported.
    if let Some(command) = get_env(DEPLOY_COMMAND_ENV) {
        let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if !parts.is_empty() {
            config.deploy.command = parts;
        }
    }

    if let Some(dir) = get_env(STAGING_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        config.deploy.staging_dir = dir;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "resolver",
        "source_root",
        "metadata_suffix",
        "bundles",
        "segment",
        "depth",
        "descriptors",
        "suffix",
        "levels_up",
        "ignore",
        "file",
        "builtin",
        "hidden_prefix",
        "deploy",
        "command",
        "staging_dir",
        "benign_errors",
        "state",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
