use deid_core::config::IdScheme;
use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::pseudonymize;
use tracing::debug;

use crate::stage::{Stage, StageContext};

/// Swaps facility names for run-local random IDs. The mapping is dropped as
/// soon as the column is substituted.
#[derive(Debug, Clone)]
pub struct PseudonymizeFacility {
    pub column: String,
    pub id_column: String,
    pub scheme: IdScheme,
    pub digits: usize,
}

impl Stage for PseudonymizeFacility {
    fn name(&self) -> &'static str {
        "pseudonymize_facility"
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        let (table, map) = pseudonymize(
            table,
            &self.column,
            &self.id_column,
            self.scheme,
            self.digits,
            ctx.rng(),
        )?;
        debug!(distinct = map.len(), scheme = ?self.scheme, "facility pseudonyms issued");
        ctx.set_pseudonyms_issued(map.len());
        Ok(table)
    }
}
