//! Terminal output for the `lazy` binary.

pub mod console;
pub mod context;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod text;
pub mod theme;
