//! Change resolution service
//!
//! Decides which files need deploying since the last recorded revision and
//! groups them into deploy units. Git and disk access go through the
//! `VersionControl` and `FileSystem` ports.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::entities::{is_within, DeployUnit, DeploymentState};
use crate::domain::ports::{FileSystem, VcsResult, VersionControl};
use crate::domain::value_objects::{IgnorePatterns, ResolverConfig};

/// Where change detection starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// First run: record the current revision and deploy nothing
    Seed,
    /// Diff against this revision
    Since(String),
}

/// Computes deploy units for one project directory.
#[derive(Debug, Clone)]
pub struct ChangeResolver {
    project_root: PathBuf,
    config: ResolverConfig,
}

impl ChangeResolver {
    pub fn new(project_root: impl Into<PathBuf>, config: ResolverConfig) -> Self {
        Self {
            project_root: project_root.into(),
            config,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Decide between seeding and diffing.
    pub fn resolve_baseline(&self, state: &DeploymentState) -> Baseline {
        match state.last_revision() {
            Some(revision) => Baseline::Since(revision.to_string()),
            None => Baseline::Seed,
        }
    }

    /// Files changed since `since` plus untracked files, without duplicates.
    ///
    /// Diffed files come first in git's order, followed by untracked files
    /// not already listed.
    pub fn list_changed_files<V>(&self, vcs: &V, since: &str) -> VcsResult<Vec<String>>
    where
        V: VersionControl + ?Sized,
    {
        let diffed = vcs.changed_files(since)?;
        let untracked = vcs.untracked_files()?;

        let mut seen = HashSet::new();
        let files: Vec<String> = diffed
            .into_iter()
            .chain(untracked)
            .filter(|f| !f.is_empty())
            .filter(|f| seen.insert(f.clone()))
            .collect();

        debug!(count = files.len(), since, "listed changed files");
        Ok(files)
    }

    /// Drop ignored, out-of-tree and unchanged files, recording timestamps.
    ///
    /// A file whose recorded stamp matches its current modification time is
    /// skipped without touching the state. Every other file gets its stamp
    /// recorded, ignored files included, but only non-ignored files under
    /// the source root are returned.
    pub fn filter_and_dedupe<F>(
        &self,
        files: &[String],
        patterns: &IgnorePatterns,
        state: &mut DeploymentState,
        fs: &F,
    ) -> Vec<String>
    where
        F: FileSystem + ?Sized,
    {
        let mut candidates = Vec::new();

        for file in files {
            let stamp = match fs.modified(&self.project_root.join(file)) {
                Ok(stamp) => stamp,
                Err(e) => {
                    warn!(file = %file, error = %e, "cannot read modification time, skipping");
                    continue;
                }
            };

            if state.stamp(file) == Some(stamp) {
                debug!(file = %file, "unchanged since last evaluation");
                continue;
            }
            state.record_stamp(file.clone(), stamp);

            if patterns.is_ignored(file) {
                debug!(file = %file, "ignored");
                continue;
            }
            if !self.in_source_root(file) {
                debug!(file = %file, "outside source root");
                continue;
            }

            candidates.push(file.clone());
        }

        candidates
    }

    /// Expand candidate paths into deploy units.
    ///
    /// Units keep candidate order. A bundle or descriptor root is emitted
    /// once however many of its files changed, and a file and its metadata
    /// companion form one unit. Nothing inside an emitted tree survives as
    /// a unit of its own, whichever was listed first.
    pub fn expand_to_units<F>(&self, candidates: &[String], fs: &F) -> Vec<DeployUnit>
    where
        F: FileSystem + ?Sized,
    {
        let mut units: Vec<DeployUnit> = Vec::new();
        let mut tree_roots: Vec<String> = Vec::new();
        let mut file_keys: HashSet<String> = HashSet::new();

        for path in candidates {
            if tree_roots.iter().any(|root| is_within(path, root)) {
                continue;
            }

            if let Some(root) = self.bundle_root(path).or_else(|| self.descriptor_root(path)) {
                if tree_roots.iter().any(|r| is_within(&root, r)) {
                    continue;
                }
                debug!(path = %path, root = %root, "grouped into tree");
                // Earlier units the new tree stages anyway
                units.retain(|unit| !unit.paths().iter().all(|p| is_within(p, &root)));
                tree_roots.push(root.clone());
                units.push(DeployUnit::tree(root));
                continue;
            }

            let base = self.base_path(path);
            if !file_keys.insert(base.to_string()) {
                continue;
            }
            units.push(self.file_unit(path, fs));
        }

        units
    }

    fn in_source_root(&self, path: &str) -> bool {
        let root = self.config.source_root.trim_matches('/');
        root.is_empty() || is_within(path, root)
    }

    /// Root of the bundle a path belongs to, if any.
    fn bundle_root(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('/').collect();
        // The last segment is the file name; only directories form bundles.
        let dirs = segments.len().checked_sub(1)?;

        self.config.bundles.iter().find_map(|rule| {
            let index = segments[..dirs].iter().position(|s| *s == rule.segment)?;
            let end = (index + rule.depth).min(dirs - 1);
            Some(segments[..=end].join("/"))
        })
    }

    /// Ancestor directory a descriptor file pulls in, if any.
    fn descriptor_root(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('/').collect();
        let name = segments.last()?;

        self.config.descriptors.iter().find_map(|rule| {
            if !name.ends_with(rule.suffix.as_str()) {
                return None;
            }
            if rule.levels_up == 0 || rule.levels_up >= segments.len() {
                return None;
            }
            Some(segments[..segments.len() - rule.levels_up].join("/"))
        })
    }

    /// The source file a path describes: itself, or the file its metadata
    /// companion belongs to.
    fn base_path<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_suffix(self.config.metadata_suffix.as_str()) {
            Some(base) if !base.is_empty() && !base.ends_with('/') => base,
            _ => path,
        }
    }

    fn file_unit<F>(&self, path: &str, fs: &F) -> DeployUnit
    where
        F: FileSystem + ?Sized,
    {
        let base = self.base_path(path);
        let companion = if base != path {
            base.to_string()
        } else {
            format!("{}{}", path, self.config.metadata_suffix)
        };

        if fs.exists(&self.project_root.join(&companion)) {
            DeployUnit::file_with_companion(path, companion)
        } else {
            DeployUnit::file(path)
        }
    }
}
