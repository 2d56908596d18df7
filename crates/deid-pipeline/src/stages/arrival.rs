use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::generalize_time;

use crate::stage::{Stage, StageContext};

#[derive(Debug, Clone)]
pub struct GeneralizeArrival {
    pub column: String,
    pub date_column: String,
    pub range_column: String,
}

impl Stage for GeneralizeArrival {
    fn name(&self) -> &'static str {
        "generalize_arrival"
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: Table, _ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        generalize_time(table, &self.column, &self.date_column, &self.range_column)
    }
}
