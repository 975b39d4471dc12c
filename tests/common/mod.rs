//! Common test utilities for LazyDeploy CLI tests.
//!
//! `TestEnv` builds a throwaway git project with a scripted deploy command
//! and runs the `lazy` binary inside it.

pub mod env;

pub use env::*;
