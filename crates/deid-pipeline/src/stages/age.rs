use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::bracket_ages;

use crate::stage::{Stage, StageContext};

#[derive(Debug, Clone)]
pub struct BracketAge {
    pub column: String,
    pub bracket_column: String,
}

impl Stage for BracketAge {
    fn name(&self) -> &'static str {
        "bracket_age"
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: Table, _ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        bracket_ages(table, &self.column, &self.bracket_column)
    }
}
