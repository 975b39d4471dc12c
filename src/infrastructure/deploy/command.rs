//! Deploy runner that spawns an external command.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::domain::ports::{DeployError, DeployExit, DeployResult, DeployRunner};

/// Runs `<command...> <staging_dir>` in the project directory.
///
/// stdout is piped and streamed line by line; stderr goes straight to the
/// terminal.
#[derive(Debug, Clone)]
pub struct CommandDeployRunner {
    command: Vec<String>,
    working_dir: PathBuf,
}

impl CommandDeployRunner {
    pub fn new(command: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
        }
    }
}

impl DeployRunner for CommandDeployRunner {
    fn describe(&self) -> String {
        self.command.join(" ")
    }

    fn run(&self, staging_dir: &Path, on_line: &mut dyn FnMut(&str)) -> DeployResult<DeployExit> {
        let (program, args) = self.command.split_first().ok_or(DeployError::EmptyCommand)?;
        debug!(command = %self.describe(), staging = %staging_dir.display(), "spawning deploy");

        let mut child = Command::new(program)
            .args(args)
            .arg(staging_dir)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DeployError::Spawn {
                command: self.describe(),
                source,
            })?;

        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf);
                        on_line(line.trim_end_matches(['\n', '\r']));
                    }
                    Err(e) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(DeployError::Stream(e));
                    }
                }
            }
        }

        let status = child.wait().map_err(DeployError::Wait)?;
        let exit = DeployExit {
            code: status.code(),
        };
        if !exit.success() {
            warn!(code = ?exit.code, "deploy command exited unsuccessfully");
        }
        Ok(exit)
    }
}
