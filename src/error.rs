//! Error types for LazyDeploy
//!
//! Each port defines its own `thiserror` enum; `LazyError` aggregates them
//! for the application layer.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{DeployError, FsError, StateError, VcsError};
use crate::domain::value_objects::IgnoreError;

/// Result type alias for LazyDeploy operations
pub type LazyResult<T> = Result<T, LazyError>;

/// Main error type for LazyDeploy operations
#[derive(Error, Debug)]
pub enum LazyError {
    /// Persisting the deployment state failed
    #[error(transparent)]
    State(#[from] StateError),

    /// A git query failed
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Staging directory could not be prepared
    #[error(transparent)]
    Fs(#[from] FsError),

    /// The deploy command could not be run
    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// The project ignore file is invalid
    #[error(transparent)]
    Ignore(#[from] IgnoreError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
