//! Domain Entities
//!
//! - `DeploymentState` - last deployed revision and observed file timestamps
//! - `DeployUnit` - what actually gets staged for a changed file

mod deploy_unit;
mod deployment_state;

pub use deploy_unit::DeployUnit;
pub(crate) use deploy_unit::is_within;
pub use deployment_state::DeploymentState;
