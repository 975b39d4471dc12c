//! Domain Layer
//!
//! Change detection and file classification, free of process and disk access.
//!
//! ## Structure
//!
//! - `entities/` - `DeploymentState`, `DeployUnit`
//! - `value_objects/` - `FileStamp`, `IgnorePatterns`, `ResolverConfig`
//! - `services/` - `ChangeResolver`, deploy output scanning
//! - `ports/` - Interface definitions for infrastructure
//!
//! All I/O goes through the traits in `ports/`, so services can be exercised
//! with in-memory fakes.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
