//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod state;

pub use state::{TomlStateRepository, STORE_VERSION};
