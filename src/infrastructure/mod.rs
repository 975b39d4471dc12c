//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - local file system and home directory resolution
//! - `repositories/` - TOML state store
//! - `vcs/` - git command line adapter
//! - `deploy/` - external deploy command

pub mod deploy;
pub mod fs;
pub mod repositories;
pub mod vcs;

pub use deploy::CommandDeployRunner;
pub use fs::LocalFs;
pub use repositories::TomlStateRepository;
pub use vcs::GitCli;
