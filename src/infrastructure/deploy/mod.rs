//! Deploy command adapters

mod command;

pub use command::CommandDeployRunner;
