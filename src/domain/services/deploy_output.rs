//! Deploy output classification
//!
//! The deploy CLI reports success and failure only through its output, so
//! each streamed line is classified as it arrives.

/// Fragments that mark a line as a benign error report.
pub const DEFAULT_BENIGN_ERRORS: &[&str] = &["Dependent class is invalid"];

/// What a single line of deploy output means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Transient status (`SOURCE ...`, `*** ...`), shown in place
    Progress,
    /// The deploy job identifier
    JobInfo,
    /// An error that blocks advancing the baseline
    Error,
    /// Anything else
    Other,
}

/// Classifies deploy output lines and collects the error lines.
#[derive(Debug, Clone)]
pub struct DeployOutputScanner {
    benign: Vec<String>,
    errors: Vec<String>,
}

impl Default for DeployOutputScanner {
    fn default() -> Self {
        Self::new(DEFAULT_BENIGN_ERRORS.iter().map(|s| s.to_string()).collect())
    }
}

impl DeployOutputScanner {
    /// `benign` fragments are matched case-insensitively.
    pub fn new(benign: Vec<String>) -> Self {
        Self {
            benign: benign.into_iter().map(|b| b.to_lowercase()).collect(),
            errors: Vec::new(),
        }
    }

    pub fn classify(&self, line: &str) -> LineKind {
        if line.starts_with("SOURCE") || line.starts_with("***") {
            return LineKind::Progress;
        }
        if line.starts_with("Job ID") {
            return LineKind::JobInfo;
        }

        let lower = line.to_lowercase();
        if lower.contains("error") && !self.benign.iter().any(|b| lower.contains(b.as_str())) {
            LineKind::Error
        } else {
            LineKind::Other
        }
    }

    /// Classify a line and keep it if it is an error.
    pub fn observe(&mut self, line: &str) -> LineKind {
        let kind = self.classify(line);
        if kind == LineKind::Error {
            self.errors.push(line.trim_end().to_string());
        }
        kind
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
