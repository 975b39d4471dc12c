//! FileSystem port - abstraction over file I/O operations
//!
//! Lets the resolver and the stager run against the local disk or an
//! in-memory fake.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::FileStamp;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error, keeping the path it happened on.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - in-memory fakes in tests
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Last modification time of a file
    fn modified(&self, path: &Path) -> FsResult<FileStamp>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Copy one file, creating the parents of `to`
    fn copy_file(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Copy a directory tree, creating `to` and its parents
    fn copy_dir_all(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a directory tree. A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;
}
