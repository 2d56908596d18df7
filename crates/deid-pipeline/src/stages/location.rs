use deid_core::config::JoinMissPolicy;
use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use tracing::warn;

use crate::report::RowIssue;
use crate::stage::{Stage, StageContext};

/// Joins the location key against the reference index and drops the key.
/// Leaves the area and score columns for [`super::AttachDecile`].
#[derive(Debug, Clone)]
pub struct GeneralizeLocation {
    pub key_column: String,
    pub area_column: String,
    pub score_column: String,
    pub policy: JoinMissPolicy,
    pub impute_label: String,
    pub fail_on_empty: bool,
}

impl Stage for GeneralizeLocation {
    fn name(&self) -> &'static str {
        "generalize_location"
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.key_column.as_str()]
    }

    fn apply(&self, table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        let rows_in = table.row_count();
        let joined = ctx.reference().lookup().join(
            table,
            &self.key_column,
            &self.area_column,
            &self.score_column,
            self.policy,
            &self.impute_label,
        )?;
        ctx.record(RowIssue::JoinMiss, joined.misses);

        let mut table = joined.table;
        if rows_in > 0 && table.is_empty() {
            if self.fail_on_empty {
                return Err(GeneralizeError::EmptyJoin {
                    column: self.key_column.clone(),
                });
            }
            warn!(column = %self.key_column, "reference join kept no rows");
        }
        table.drop_column(&self.key_column)?;
        Ok(table)
    }
}
