use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::CategoryFilter;
use tracing::warn;

use crate::report::RowIssue;
use crate::stage::{Stage, StageContext};

#[derive(Debug, Clone)]
pub struct FilterGender {
    column: String,
    filter: CategoryFilter,
}

impl FilterGender {
    pub fn new<I, S>(column: String, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column,
            filter: CategoryFilter::new(allowed),
        }
    }
}

impl Stage for FilterGender {
    fn name(&self) -> &'static str {
        "filter_gender"
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        let (table, excluded) = self.filter.apply(table, &self.column)?;
        if excluded > 0 {
            warn!(excluded, column = %self.column, "rows outside the allowed categories dropped");
        }
        ctx.record(RowIssue::InvalidCategory, excluded);
        Ok(table)
    }
}
