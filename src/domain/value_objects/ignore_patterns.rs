//! Ignore patterns value object
//!
//! Built-in patterns plus the project ignore file (`.forceignore` by default).
//! Each pattern is an fnmatch-style glob matched against the whole
//! project-relative path, so `*` also matches across `/`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum file size for the ignore file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns a candidate file is checked against before deployment.
///
/// Besides the glob patterns, any file whose name starts with the hidden
/// prefix (`.`) is ignored.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: GlobSet,
    pattern_count: usize,
    hidden_prefix: String,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Pattern set that only ignores hidden files.
    pub fn empty() -> Self {
        Self {
            matcher: GlobSet::empty(),
            pattern_count: 0,
            hidden_prefix: ".".to_string(),
        }
    }

    /// Load `builtin` patterns plus `<project_root>/<ignore_file>`.
    ///
    /// A missing ignore file is not an error.
    pub fn load(
        project_root: &Path,
        ignore_file: &str,
        builtin: &[String],
        hidden_prefix: &str,
    ) -> Result<Self, IgnoreError> {
        let ignore_path = project_root.join(ignore_file);

        if !ignore_path.exists() {
            return Self::from_content(&ignore_path, builtin, hidden_prefix, "");
        }

        let metadata = fs::metadata(&ignore_path).map_err(|source| IgnoreError::Io {
            path: ignore_path.clone(),
            source,
        })?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path).map_err(|source| IgnoreError::Io {
            path: ignore_path.clone(),
            source,
        })?;
        Self::from_content(&ignore_path, builtin, hidden_prefix, &content)
    }

    /// Parse patterns from string content. `source_path` is only used in
    /// error messages.
    pub fn from_content(
        source_path: &Path,
        builtin: &[String],
        hidden_prefix: &str,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GlobSetBuilder::new();
        let mut pattern_count = 0;

        let builtin_lines = builtin.iter().map(|p| (None, p.as_str()));
        let file_lines = content
            .lines()
            .enumerate()
            .map(|(n, line)| (Some(n + 1), line));

        for (line_num, line) in builtin_lines.chain(file_lines) {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            let pattern = collapse_partial_double_star(trimmed);
            let glob = GlobBuilder::new(&pattern)
                .literal_separator(false)
                .backslash_escape(false)
                .build()
                .map_err(|e| IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num.unwrap_or(0),
                    pattern: trimmed.to_string(),
                    message: e.kind().to_string(),
                })?;
            builder.add(glob);
        }

        Ok(Self {
            matcher: builder.build()?,
            pattern_count,
            hidden_prefix: hidden_prefix.to_string(),
        })
    }

    /// Check a project-relative, `/`-separated file path.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.is_hidden(rel_path) || self.matcher.is_match(rel_path)
    }

    fn is_hidden(&self, rel_path: &str) -> bool {
        if self.hidden_prefix.is_empty() {
            return false;
        }
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        name.starts_with(&self.hidden_prefix)
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Rewrite a `**` that is not a whole path segment (as in `**.json`) to `*`.
///
/// Under fnmatch `**.json` and `*.json` are the same pattern, since `*`
/// already crosses `/`. Whole-segment `**` (`a/**/b`, `src/**`) is kept.
fn collapse_partial_double_star(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '*' && chars.get(i + 1) == Some(&'*') {
            let mut end = i;
            while chars.get(end) == Some(&'*') {
                end += 1;
            }
            let starts_segment = i == 0 || chars[i - 1] == '/';
            let ends_segment = end == chars.len() || chars[end] == '/';
            if starts_segment && ends_segment {
                out.push_str("**");
            } else {
                out.push('*');
            }
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("ignore file exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("ignore file has {count} patterns, exceeds {limit} limit: {}", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(#[from] globset::Error),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
