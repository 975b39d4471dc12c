//! Deploy unit entity
//!
//! A changed file rarely deploys on its own: metadata companions travel with
//! their source, and bundle-style folders deploy as a whole.

use std::fmt;

/// Something staged for the deploy command. Paths are project-relative and
/// `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployUnit {
    /// A single file, plus its metadata companion when one exists on disk.
    File {
        path: String,
        companion: Option<String>,
    },
    /// A whole directory subtree.
    Tree { root: String },
}

impl DeployUnit {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            companion: None,
        }
    }

    pub fn file_with_companion(path: impl Into<String>, companion: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            companion: Some(companion.into()),
        }
    }

    pub fn tree(root: impl Into<String>) -> Self {
        Self::Tree { root: root.into() }
    }

    /// The primary path: the file itself or the tree root.
    pub fn primary(&self) -> &str {
        match self {
            Self::File { path, .. } => path,
            Self::Tree { root } => root,
        }
    }

    /// Every path this unit stages, primary first.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::File { path, companion } => {
                let mut paths = vec![path.as_str()];
                if let Some(companion) = companion {
                    paths.push(companion.as_str());
                }
                paths
            }
            Self::Tree { root } => vec![root.as_str()],
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree { .. })
    }

    /// Whether `path` is staged by this unit.
    pub fn covers(&self, path: &str) -> bool {
        match self {
            Self::File { path: p, companion } => {
                p == path || companion.as_deref() == Some(path)
            }
            Self::Tree { root } => is_within(path, root),
        }
    }
}

impl fmt::Display for DeployUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File {
                path,
                companion: Some(companion),
            } => write!(f, "{} (+ {})", path, companion),
            Self::File { path, .. } => write!(f, "{}", path),
            Self::Tree { root } => write!(f, "{}/", root),
        }
    }
}

/// `path` equals `root` or lies beneath it, compared by whole segments.
pub(crate) fn is_within(path: &str, root: &str) -> bool {
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
