//! Deploy Result
//!
//! Result types for deploy operations.

use crate::domain::entities::DeployUnit;
use crate::domain::ports::CopyIssue;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// First run: the current revision became the baseline
    SeedRegistered { revision: String },
    /// Tracking cleared and the current revision re-registered
    Reset { revision: String },
    /// Nothing deploy-relevant changed
    NoChanges,
    /// Units deployed and the baseline advanced to `revision`
    Deployed {
        revision: String,
        units: Vec<DeployUnit>,
        copy_issues: Vec<CopyIssue>,
    },
    /// The deploy reported errors; nothing was recorded
    Failed {
        errors: Vec<String>,
        copy_issues: Vec<CopyIssue>,
    },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn copy_issues(&self) -> &[CopyIssue] {
        match self {
            Self::Deployed { copy_issues, .. } | Self::Failed { copy_issues, .. } => copy_issues,
            _ => &[],
        }
    }
}
