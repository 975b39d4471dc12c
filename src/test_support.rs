//! In-memory fakes for the domain ports, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::entities::DeploymentState;
use crate::domain::ports::{
    DeployEvent, DeployEventSink, DeployExit, DeployResult, DeployRunner, FileSystem, FsError,
    FsResult, StateError, StateRepository, StateResult, VcsError, VcsResult, VersionControl,
};
use crate::domain::value_objects::FileStamp;

/// File system fake rooted at `/project`.
#[derive(Debug, Default)]
pub struct FakeFs {
    files: BTreeMap<PathBuf, FileStamp>,
}

impl FakeFs {
    pub const ROOT: &'static str = "/project";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, rel: &str, nanos: u64) -> Self {
        self.files
            .insert(Path::new(Self::ROOT).join(rel), FileStamp::from_nanos(nanos));
        self
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        Err(FsError::NotFound(path.to_path_buf()))
    }

    fn modified(&self, path: &Path) -> FsResult<FileStamp> {
        self.files
            .get(path)
            .copied()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }

    fn copy_file(&self, from: &Path, _to: &Path) -> FsResult<()> {
        if !self.files.contains_key(from) {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        Ok(())
    }

    fn copy_dir_all(&self, _from: &Path, _to: &Path) -> FsResult<()> {
        Ok(())
    }

    fn remove_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }
}

/// Version control fake with canned answers.
#[derive(Debug, Default)]
pub struct FakeVcs {
    revision: String,
    changed: Vec<String>,
    untracked: Vec<String>,
    fail: bool,
    diffed_since: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn new(revision: &str) -> Self {
        Self {
            revision: revision.to_string(),
            ..Self::default()
        }
    }

    pub fn with_changed(mut self, files: &[&str]) -> Self {
        self.changed = files.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_untracked(mut self, files: &[&str]) -> Self {
        self.untracked = files.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn diffed_since(&self) -> Vec<String> {
        self.diffed_since.borrow().clone()
    }

    fn check(&self, command: &str) -> VcsResult<()> {
        if self.fail {
            return Err(VcsError::Failed {
                command: command.to_string(),
                stderr: "fatal: not a git repository".to_string(),
            });
        }
        Ok(())
    }
}

impl VersionControl for FakeVcs {
    fn current_revision(&self) -> VcsResult<String> {
        self.check("rev-parse")?;
        Ok(self.revision.clone())
    }

    fn changed_files(&self, since: &str) -> VcsResult<Vec<String>> {
        self.check("diff")?;
        self.diffed_since.borrow_mut().push(since.to_string());
        Ok(self.changed.clone())
    }

    fn untracked_files(&self) -> VcsResult<Vec<String>> {
        self.check("ls-files")?;
        Ok(self.untracked.clone())
    }
}

/// Deploy runner that replays fixed output and records what was staged.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    lines: Vec<String>,
    code: Option<i32>,
    runs: Cell<usize>,
    staged: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(lines: &[&str], code: i32) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.get()
    }

    /// Files present in the staging directory while the deploy ran.
    pub fn staged(&self) -> Vec<String> {
        self.staged.borrow().clone()
    }
}

impl DeployRunner for ScriptedRunner {
    fn describe(&self) -> String {
        "scripted deploy".to_string()
    }

    fn run(&self, staging_dir: &Path, on_line: &mut dyn FnMut(&str)) -> DeployResult<DeployExit> {
        self.runs.set(self.runs.get() + 1);
        *self.staged.borrow_mut() = list_files(staging_dir);
        for line in &self.lines {
            on_line(line);
        }
        Ok(DeployExit { code: self.code })
    }
}

/// Relative, sorted paths of every file below `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out);
            } else if let Ok(rel) = path.strip_prefix(base) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

/// Event sink that records all events
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// State repository kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStateRepository {
    states: RefCell<HashMap<PathBuf, DeploymentState>>,
    corrupted: bool,
    fail_save: bool,
    saves: Cell<usize>,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(self, project: &Path, state: DeploymentState) -> Self {
        self.states.borrow_mut().insert(project.to_path_buf(), state);
        self
    }

    pub fn corrupted() -> Self {
        Self {
            corrupted: true,
            ..Self::default()
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn stored(&self, project: &Path) -> Option<DeploymentState> {
        self.states.borrow().get(project).cloned()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl StateRepository for MemoryStateRepository {
    fn load(&self, project_dir: &Path) -> StateResult<Option<DeploymentState>> {
        if self.corrupted {
            return Err(StateError::Corrupted {
                path: PathBuf::from("memory"),
                message: "garbage".to_string(),
            });
        }
        Ok(self.states.borrow().get(project_dir).cloned())
    }

    fn save(&self, project_dir: &Path, state: &DeploymentState) -> StateResult<()> {
        if self.fail_save {
            return Err(StateError::Access {
                path: PathBuf::from("memory"),
                source: std::io::Error::other("read-only"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        self.states
            .borrow_mut()
            .insert(project_dir.to_path_buf(), state.clone());
        Ok(())
    }
}
