//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod deploy_runner;
pub mod file_system;
pub mod state_repository;
pub mod version_control;

pub use deploy_events::{CopyIssue, DeployEvent, DeployEventSink, NoopEventSink};
pub use deploy_runner::{DeployError, DeployExit, DeployResult, DeployRunner};
pub use file_system::{FileSystem, FsError, FsResult};
pub use state_repository::{StateError, StateRepository, StateResult};
pub use version_control::{VcsError, VcsResult, VersionControl};
