//! State store
//!
//! Wraps a `StateRepository` with the recovery policy: an unreadable store
//! never stops a run, it just means starting from a fresh state.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::DeploymentState;
use crate::domain::ports::{StateRepository, StateResult};

pub struct StateStore<R: StateRepository> {
    repo: R,
}

impl<R: StateRepository> StateStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// State for `project_dir`; empty when nothing is stored or the store
    /// cannot be read.
    pub fn load(&self, project_dir: &Path) -> DeploymentState {
        match self.repo.load(project_dir) {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(project = %project_dir.display(), "no recorded state");
                DeploymentState::new()
            }
            Err(e) => {
                warn!(error = %e, "state store unreadable, starting fresh");
                DeploymentState::new()
            }
        }
    }

    pub fn save(&self, project_dir: &Path, state: &DeploymentState) -> StateResult<()> {
        self.repo.save(project_dir, state)
    }

    /// Set the baseline revision and persist.
    pub fn record_revision(
        &self,
        state: &mut DeploymentState,
        project_dir: &Path,
        revision: &str,
    ) -> StateResult<()> {
        state.set_revision(revision, Utc::now());
        self.save(project_dir, state)
    }

    /// Forget tracked files, then record `revision` as the new baseline.
    pub fn reset(
        &self,
        state: &mut DeploymentState,
        project_dir: &Path,
        revision: &str,
    ) -> StateResult<()> {
        state.clear_files();
        self.record_revision(state, project_dir, revision)
    }
}
