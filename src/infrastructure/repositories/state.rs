//! TOML State Repository
//!
//! Persists deployment state for every project in one shared file,
//! `~/.lazydeploy/state.toml` by default, keyed by project directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::DeploymentState;
use crate::domain::ports::{StateError, StateRepository, StateResult};
use crate::domain::value_objects::FileStamp;

/// Current store format version
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlStore {
    version: u32,
    #[serde(default)]
    projects: BTreeMap<String, TomlProjectState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlProjectState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    files: BTreeMap<String, FileStamp>,
}

pub struct TomlStateRepository {
    path: PathBuf,
}

impl TomlStateRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn access_error(&self, source: std::io::Error) -> StateError {
        StateError::Access {
            path: self.path.clone(),
            source,
        }
    }

    /// Open (creating if needed) the lock file next to the store.
    fn open_lock(&self) -> StateResult<fs::File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.access_error(e))?;
        }
        fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.access_error(e))
    }

    fn load_from_disk(&self) -> StateResult<TomlStore> {
        if !self.path.exists() {
            return Ok(TomlStore {
                version: STORE_VERSION,
                ..TomlStore::default()
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.access_error(e))?;

        let probe: VersionProbe = toml::from_str(&content).map_err(|e| StateError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        if probe.version != STORE_VERSION {
            return Err(StateError::VersionMismatch {
                path: self.path.clone(),
                found: probe.version,
                expected: STORE_VERSION,
            });
        }

        toml::from_str(&content).map_err(|e| StateError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Write the store through a temp file in the same directory.
    fn save_to_disk(&self, store: &TomlStore) -> StateResult<()> {
        let content = toml::to_string_pretty(store).map_err(|e| StateError::Serialize {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| self.access_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| self.access_error(e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| self.access_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.access_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.access_error(e.error))?;

        debug!(path = %self.path.display(), projects = store.projects.len(), "state saved");
        Ok(())
    }
}

impl StateRepository for TomlStateRepository {
    fn load(&self, project_dir: &Path) -> StateResult<Option<DeploymentState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let lock_file = self.open_lock()?;
        FileExt::lock_shared(&lock_file).map_err(|e| self.access_error(e))?;

        let result = self.load_from_disk();

        let _ = FileExt::unlock(&lock_file);
        let store = result?;

        Ok(store
            .projects
            .get(&project_key(project_dir))
            .cloned()
            .map(from_toml))
    }

    fn save(&self, project_dir: &Path, state: &DeploymentState) -> StateResult<()> {
        let lock_file = self.open_lock()?;
        FileExt::lock_exclusive(&lock_file).map_err(|e| self.access_error(e))?;

        // Other projects' entries survive; an unreadable store is replaced.
        let mut store = match self.load_from_disk() {
            Ok(store) => store,
            Err(e @ (StateError::Corrupted { .. } | StateError::VersionMismatch { .. })) => {
                warn!(error = %e, "replacing unreadable state store");
                TomlStore::default()
            }
            Err(e) => {
                let _ = FileExt::unlock(&lock_file);
                return Err(e);
            }
        };
        store.version = STORE_VERSION;
        store.projects.insert(project_key(project_dir), to_toml(state));

        let result = self.save_to_disk(&store);

        let _ = FileExt::unlock(&lock_file);
        result
    }
}

/// Store key for a project: canonical path with `/` separators.
fn project_key(project_dir: &Path) -> String {
    let canonical = fs::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
    canonical.to_string_lossy().replace('\\', "/")
}

fn from_toml(project: TomlProjectState) -> DeploymentState {
    DeploymentState::with_parts(project.last_revision, project.files, project.updated_at)
}

fn to_toml(state: &DeploymentState) -> TomlProjectState {
    TomlProjectState {
        last_revision: state.last_revision().map(str::to_string),
        updated_at: state.updated_at(),
        files: state
            .files()
            .map(|(path, stamp)| (path.to_string(), stamp))
            .collect(),
    }
}
