//! What a run did: per-stage row counts and row-level issues.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Row-level problems that are handled by dropping or imputing rather than
/// aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIssue {
    /// No reference entry for the row's location key.
    JoinMiss,
    /// Categorical value outside the allowed set, or null.
    InvalidCategory,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::JoinMiss => "join_miss",
            Self::InvalidCategory => "invalid_category",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub name: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub elapsed_ms: u64,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Seed the run's random source was built from.
    pub seed: u64,
    pub rows_in: usize,
    pub rows_out: usize,
    pub stages: Vec<StageReport>,
    pub issues: BTreeMap<RowIssue, usize>,
    /// Distinct facility IDs handed out. The mapping itself is not kept.
    pub pseudonyms_issued: usize,
}

impl RunReport {
    pub fn issue_count(&self, issue: RowIssue) -> usize {
        self.issues.get(&issue).copied().unwrap_or(0)
    }

    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}
