//! Domain Services
//!
//! Business logic operating on domain entities. I/O happens only through
//! the ports passed in, so services are testable with fakes.

mod change_resolver;
mod deploy_output;

pub use change_resolver::{Baseline, ChangeResolver};
pub use deploy_output::{DeployOutputScanner, LineKind, DEFAULT_BENIGN_ERRORS};
