//! LazyDeploy - incremental deploys of changed project sources
//!
//! LazyDeploy remembers the last revision it deployed for each project and,
//! on the next run, stages only the files that changed since then (committed
//! or not) before handing them to an external deploy CLI.
//!
//! ## Layers
//!
//! - `domain/` - state entity, deploy units, ignore patterns, change resolution
//! - `application/` - state store, staging and the deploy use case
//! - `infrastructure/` - git, local file system, TOML state store, deploy process
//! - `presentation/` - CLI argument definitions

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::{DeployOptions, DeployOutcome, DeployUseCase, StateStore};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{DeployUnit, DeploymentState};
pub use domain::services::{Baseline, ChangeResolver};
pub use domain::value_objects::{FileStamp, IgnorePatterns, ResolverConfig};
pub use error::{LazyError, LazyResult};
