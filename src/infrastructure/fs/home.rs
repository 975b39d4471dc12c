//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the Windows system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `lazydeploy_home_dir()` checks `LAZYDEPLOY_TEST_HOME` first and falls
//! back to `dirs::home_dir()`.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const LAZYDEPLOY_TEST_HOME_VAR: &str = "LAZYDEPLOY_TEST_HOME";

/// Get the home directory for LazyDeploy-internal paths.
///
/// Returns `None` if neither `LAZYDEPLOY_TEST_HOME` is set nor the system
/// home can be resolved.
pub fn lazydeploy_home_dir() -> Option<PathBuf> {
    std::env::var(LAZYDEPLOY_TEST_HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Default state store: `~/.lazydeploy/state.toml`
pub fn default_state_file() -> Option<PathBuf> {
    lazydeploy_home_dir().map(|home| home.join(".lazydeploy").join("state.toml"))
}
