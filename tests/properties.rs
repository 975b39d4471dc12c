//! Property tests for LazyDeploy.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/resolver.rs"]
mod resolver;
