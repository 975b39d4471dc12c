//! Deploy Event Port
//!
//! Provides an observable interface for deploy runs.
//! Enables progress reporting and live deploy output.

/// A file that could not be copied into the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyIssue {
    pub path: String,
    pub error: String,
}

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// No baseline existed; the current revision was recorded instead
    SeedRegistered { revision: String },

    /// Tracked file timestamps were cleared
    TrackingCleared,

    /// Change detection finished
    ChangesResolved { changed: usize, candidates: usize },

    /// Nothing left to deploy after filtering
    NoChanges,

    /// Staging started
    StagingStarted { unit_count: usize },

    /// One deploy unit was copied (or attempted)
    UnitStaged { index: usize, total: usize },

    /// Staging finished; primary files that failed to copy
    StagingFinished { issues: Vec<CopyIssue> },

    /// Deploy command started
    DeployStarted { command: String },

    /// Status line from the deploy command (`SOURCE ...`, `*** ...`)
    DeployProgress { line: String },

    /// Job identifier reported by the deploy command
    DeployJob { line: String },

    /// Deploy finished with error lines; baseline not advanced
    DeployFailed { errors: Vec<String> },

    /// Deploy succeeded; baseline advanced
    Deployed { revision: String, unit_count: usize },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `ConsoleEventSink` (binary): progress bar and live status line
/// - `NoopEventSink`: silent operation
pub trait DeployEventSink: Send + Sync {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
