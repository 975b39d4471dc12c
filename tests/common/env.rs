//! Isolated project environment for running `lazy`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running the `lazy` binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// A git project plus a separate home directory.
///
/// The deploy command is a shell script in the home directory. It records
/// the staged files (relative to the staging directory, sorted) in
/// `staged.txt` and prints the contents of `output.txt`.
pub struct TestEnv {
    pub project: TempDir,
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        };

        let script = env.home_path("deploy.sh");
        fs::write(
            &script,
            format!(
                "cd \"$1\" || exit 1\nfind . -type f | sed 's|^\\./||' | sort > {staged:?}\ncat {output:?}\n",
                staged = env.home_path("staged.txt").display().to_string(),
                output = env.home_path("output.txt").display().to_string(),
            ),
        )
        .unwrap();
        env.set_deploy_output("SOURCE PROGRESS | Done\nJob ID | 0Af000000000001\n");

        env.write(
            ".lazydeploy.toml",
            &format!(
                "[deploy]\ncommand = [\"sh\", {:?}]\n",
                script.display().to_string()
            ),
        );
        env.write(".gitignore", "temp/\n");
        env.write("src/classes/Existing.cls", "public class Existing {}\n");
        env.write("README.md", "project\n");

        env.git(&["init", "-q"]);
        env.commit_all("initial");
        env
    }

    pub fn root(&self) -> &Path {
        self.project.path()
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    pub fn state_file(&self) -> PathBuf {
        self.home_path(".lazydeploy/state.toml")
    }

    /// Write a project file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn set_deploy_output(&self, output: &str) {
        fs::write(self.home_path("output.txt"), output).unwrap();
    }

    /// Files the last deploy command saw in the staging directory.
    pub fn staged(&self) -> Option<Vec<String>> {
        fs::read_to_string(self.home_path("staged.txt"))
            .ok()
            .map(|s| s.lines().map(str::to_string).collect())
    }

    pub fn clear_staged(&self) {
        let _ = fs::remove_file(self.home_path("staged.txt"));
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.project.path())
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("HOME", self.home.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "--short", "HEAD"])
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_lazy"))
            .args(args)
            .current_dir(self.project.path())
            .env("LAZYDEPLOY_TEST_HOME", self.home.path())
            .env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("LAZYDEPLOY_STATE_FILE")
            .env_remove("LAZYDEPLOY_DEPLOY_COMMAND")
            .env_remove("LAZYDEPLOY_STAGING_DIR")
            .env_remove("RUST_LOG")
            .output()
            .unwrap();

        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
