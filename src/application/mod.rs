//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - seed, resolve, stage, deploy, record the revision
//! - `StateStore` - forgiving load and explicit save of deployment state
//! - `stage_units` - copy deploy units into the staging directory

pub mod deploy;
pub mod staging;
pub mod state_store;

pub use deploy::{DeployOptions, DeployOutcome, DeployUseCase};
pub use staging::{stage_units, StagingReport};
pub use state_store::StateStore;
