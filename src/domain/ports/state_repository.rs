//! StateRepository port - abstraction for deployment state persistence
//!
//! The domain loads and saves `DeploymentState` per project directory
//! without knowing the store format or where it lives.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::DeploymentState;

/// Result type for state operations
pub type StateResult<T> = Result<T, StateError>;

/// State store errors
///
/// `Corrupted` and `VersionMismatch` are recoverable on load (the caller
/// starts fresh); `Access` and `Serialize` on save are not.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state store {} is corrupted: {message}", .path.display())]
    Corrupted { path: PathBuf, message: String },

    #[error(
        "state store {} has format version {found}, expected {expected}",
        .path.display()
    )]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("cannot access state store {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write state store {}: {message}", .path.display())]
    Serialize { path: PathBuf, message: String },
}

/// Abstract repository for deployment state
pub trait StateRepository {
    /// Load the state recorded for `project_dir`.
    ///
    /// `Ok(None)` means nothing has been recorded yet.
    fn load(&self, project_dir: &Path) -> StateResult<Option<DeploymentState>>;

    /// Persist `state` for `project_dir`, replacing what was there.
    fn save(&self, project_dir: &Path, state: &DeploymentState) -> StateResult<()>;
}
