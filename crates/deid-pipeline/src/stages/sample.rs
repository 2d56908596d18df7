use deid_core::errors::GeneralizeError;
use deid_core::table::Table;
use deid_generalize::bernoulli_sample;

use crate::stage::{Stage, StageContext};

/// Keeps each row independently with probability `fraction`.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    fraction: f64,
}

impl Sample {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }
}

impl Stage for Sample {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn apply(&self, table: Table, ctx: &mut StageContext<'_>) -> Result<Table, GeneralizeError> {
        Ok(bernoulli_sample(table, self.fraction, ctx.rng()))
    }
}
