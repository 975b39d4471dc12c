//! File Stamp Value Object
//!
//! The modification time of a file as last observed by the resolver.
//! Only compared for equality, never ordered against wall-clock time.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Modification time in nanoseconds since the Unix epoch.
///
/// Stored as a plain integer so the state file stays readable and portable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileStamp(u64);

impl FileStamp {
    pub fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Convert a filesystem time. Times before the epoch collapse to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        let nanos = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self(nanos)
    }

    pub fn as_nanos(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
