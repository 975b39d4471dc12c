//! DeployRunner port - the external deploy command.

use std::path::Path;

use thiserror::Error;

/// Result type for deploy runs
pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no deploy command configured")]
    EmptyCommand,

    #[error("failed to start deploy command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading deploy output: {0}")]
    Stream(#[source] std::io::Error),

    #[error("failed waiting for deploy command: {0}")]
    Wait(#[source] std::io::Error),
}

/// How the deploy command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployExit {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
}

impl DeployExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the deploy command against a staging directory.
pub trait DeployRunner {
    /// Human-readable command line, for progress output
    fn describe(&self) -> String;

    /// Run the deploy, handing each output line to `on_line` as soon as it
    /// is read. Blocks until the command exits.
    fn run(&self, staging_dir: &Path, on_line: &mut dyn FnMut(&str)) -> DeployResult<DeployExit>;
}
