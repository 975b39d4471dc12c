//! Git adapter using `git` CLI commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::domain::ports::{VcsError, VcsResult, VersionControl};

/// Git adapter that shells out to the `git` CLI, run inside the project
/// directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    project_root: PathBuf,
}

impl GitCli {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Run git with `args` and return its stdout.
    fn run(&self, args: &[&str]) -> VcsResult<String> {
        let command = args.join(" ");
        debug!(command = %command, "running git");

        // Unquoted, unescaped paths for non-ASCII file names
        let output = Command::new("git")
            .args(["-c", "core.quotepath=off"])
            .args(args)
            .current_dir(&self.project_root)
            .output()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcsError::Failed { command, stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_lines(&self, args: &[&str]) -> VcsResult<Vec<String>> {
        Ok(parse_lines(&self.run(args)?))
    }
}

impl VersionControl for GitCli {
    fn current_revision(&self) -> VcsResult<String> {
        Ok(self.run(&["rev-parse", "--short", "HEAD"])?.trim().to_string())
    }

    fn changed_files(&self, since: &str) -> VcsResult<Vec<String>> {
        self.run_lines(&[
            "diff",
            since,
            "--name-only",
            "--relative",
            "--diff-filter=ACMB",
        ])
    }

    fn untracked_files(&self) -> VcsResult<Vec<String>> {
        self.run_lines(&["ls-files", ".", "--exclude-standard", "--others"])
    }
}

fn parse_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
