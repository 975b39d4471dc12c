//! Deployment state entity - per-project deploy bookkeeping
//!
//! Pure data structure; persistence is handled by `StateRepository`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::FileStamp;

/// State remembered for one project directory between runs.
///
/// `file_timestamps` holds every file the resolver has evaluated, deployed or
/// ignored, so an unchanged file is not looked at again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentState {
    last_revision: Option<String>,
    file_timestamps: BTreeMap<String, FileStamp>,
    updated_at: Option<DateTime<Utc>>,
}

impl DeploymentState {
    /// Empty state: no baseline, nothing tracked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(
        last_revision: Option<String>,
        file_timestamps: BTreeMap<String, FileStamp>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            last_revision,
            file_timestamps,
            updated_at,
        }
    }

    pub fn last_revision(&self) -> Option<&str> {
        self.last_revision.as_deref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Set the baseline revision, stamping when it happened.
    pub fn set_revision(&mut self, revision: impl Into<String>, at: DateTime<Utc>) {
        self.last_revision = Some(revision.into());
        self.updated_at = Some(at);
    }

    /// Recorded modification time for a relative path.
    pub fn stamp(&self, path: &str) -> Option<FileStamp> {
        self.file_timestamps.get(path).copied()
    }

    pub fn record_stamp(&mut self, path: impl Into<String>, stamp: FileStamp) {
        self.file_timestamps.insert(path.into(), stamp);
    }

    /// Forget every tracked file. The baseline revision is kept.
    pub fn clear_files(&mut self) {
        self.file_timestamps.clear();
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, FileStamp)> {
        self.file_timestamps.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn tracked_count(&self) -> usize {
        self.file_timestamps.len()
    }

    /// True on a first run: nothing has ever been recorded as deployed.
    pub fn is_unseeded(&self) -> bool {
        self.last_revision.is_none()
    }
}
