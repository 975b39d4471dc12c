//! VersionControl port - the git queries the resolver needs.

use thiserror::Error;

/// Result type for version control queries
pub type VcsResult<T> = Result<T, VcsError>;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Read access to the project's repository.
///
/// Paths are returned relative to the project directory, `/`-separated.
pub trait VersionControl {
    /// Short identifier of the current HEAD revision
    fn current_revision(&self) -> VcsResult<String>;

    /// Files added, copied or modified between `since` and the working tree.
    /// Renames and deletions are not reported.
    fn changed_files(&self, since: &str) -> VcsResult<Vec<String>>;

    /// Untracked files that the repository's standard excludes do not hide
    fn untracked_files(&self) -> VcsResult<Vec<String>>;
}
