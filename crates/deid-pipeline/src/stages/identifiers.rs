use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use tracing::debug;

use crate::stage::{Stage, StageContext};

/// Removes direct identifiers.
#[derive(Debug, Clone)]
pub struct DropIdentifiers {
    columns: Vec<String>,
}

impl DropIdentifiers {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl Stage for DropIdentifiers {
    fn name(&self) -> &'static str {
        "drop_identifiers"
    }

    fn required_columns(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    fn apply(&self, mut table: Table, _ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        for column in &self.columns {
            table.drop_column(column)?;
        }
        debug!(dropped = self.columns.len(), "identifier columns removed");
        Ok(table)
    }
}
