//! File System Implementations
//!
//! Concrete implementation of the FileSystem port, plus home directory
//! lookup for the default state store location.

mod home;
mod local;

pub use home::{default_state_file, lazydeploy_home_dir, LAZYDEPLOY_TEST_HOME_VAR};
pub use local::LocalFs;
