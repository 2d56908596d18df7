use deid_core::errors::GeneralizeError;
use deid_core::table::{ColumnData, Table};

use crate::stage::{Stage, StageContext};

/// Replaces the joined score by its reference decile. The area column goes
/// with it; the decile is the only location detail that survives.
#[derive(Debug, Clone)]
pub struct AttachDecile {
    pub score_column: String,
    pub area_column: String,
    pub decile_column: String,
}

impl Stage for AttachDecile {
    fn name(&self) -> &'static str {
        "attach_decile"
    }

    fn apply(&self, mut table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        let scores = table.column(&self.score_column)?.to_floats()?;
        let deciles = ctx.reference().deciles().classify_all(&scores);
        table.add_column(&self.decile_column, ColumnData::Integer(deciles))?;
        table.drop_column(&self.score_column)?;
        table.drop_column(&self.area_column)?;
        Ok(table)
    }
}
