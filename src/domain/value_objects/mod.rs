//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod file_stamp;
mod ignore_patterns;
mod resolver_config;

pub use file_stamp::FileStamp;
pub use ignore_patterns::{IgnoreError, IgnorePatterns};
pub use resolver_config::{BundleRule, DescriptorRule, ResolverConfig};
