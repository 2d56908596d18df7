//! The unit of work the orchestrator sequences.

use std::collections::BTreeMap;

use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::ReferenceData;
use rand::rngs::StdRng;

use crate::report::RowIssue;

/// A `Table → Table` transform. Stages never grow the row count.
pub trait Stage: Send + Sync {
    /// Stable name used in logs, errors and the run report.
    fn name(&self) -> &'static str;

    /// Column names this stage reads. Checked once before the run starts.
    fn required_columns(&self) -> Vec<&str> {
        Vec::new()
    }

    fn apply(&self, table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError>;
}

/// Run-scoped state handed to every stage: the shared reference artifacts,
/// the run's single random source and the row-issue tallies.
pub struct StageContext<'a> {
    reference: &'a ReferenceData,
    rng: StdRng,
    issues: BTreeMap<RowIssue, usize>,
    pseudonyms_issued: usize,
}

impl<'a> StageContext<'a> {
    pub fn new(reference: &'a ReferenceData, rng: StdRng) -> Self {
        Self {
            reference,
            rng,
            issues: BTreeMap::new(),
            pseudonyms_issued: 0,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        self.reference
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Count `rows` rows handled as `issue`. Zero counts are not recorded.
    pub fn record(&mut self, issue: RowIssue, rows: usize) {
        if rows > 0 {
            *self.issues.entry(issue).or_insert(0) += rows;
        }
    }

    pub fn set_pseudonyms_issued(&mut self, count: usize) {
        self.pseudonyms_issued = count;
    }

    pub(crate) fn into_tallies(self) -> (BTreeMap<RowIssue, usize>, usize) {
        (self.issues, self.pseudonyms_issued)
    }
}
