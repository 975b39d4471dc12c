//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::FileStamp;

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn modified(&self, path: &Path) -> FsResult<FileStamp> {
        let metadata = fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
        let modified = metadata.modified().map_err(|e| FsError::from_io(path, e))?;
        Ok(FileStamp::from_system_time(modified))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> FsResult<()> {
        if let Some(parent) = to.parent() {
            self.create_dir_all(parent)?;
        }
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::from_io(from, e))
    }

    /// Merges into an existing `to`, overwriting files that exist in both.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.create_dir_all(to)?;

        for entry in fs::read_dir(from).map_err(|e| FsError::from_io(from, e))? {
            let entry = entry.map_err(|e| FsError::from_io(from, e))?;
            let source = entry.path();
            let target = to.join(entry.file_name());
            let file_type = entry.file_type().map_err(|e| FsError::from_io(&source, e))?;

            if file_type.is_dir() {
                self.copy_dir_all(&source, &target)?;
            } else {
                fs::copy(&source, &target).map_err(|e| FsError::from_io(&source, e))?;
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::from_io(path, e)),
        }
    }
}
