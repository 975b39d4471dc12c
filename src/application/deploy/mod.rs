//! Deploy Module
//!
//! Orchestrates an incremental deploy.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployOutcome`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use lazydeploy::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(git, fs, state_repo, runner, DeployOptions::new(root));
//! let outcome = use_case.execute()?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployOutcome;
pub use use_case::DeployUseCase;
