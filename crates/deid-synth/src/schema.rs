//! Column descriptions handed to a synthetic-data engine.

use deid_core::config::SynthConfig;
use deid_core::errors::SynthError;
use deid_core::table::{Column, ColumnType, Table};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How one column should be modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: ColumnType,
    /// Few enough distinct values to be modelled as a category.
    pub categorical: bool,
    /// Every value present and unique, so the column identifies rows.
    pub candidate_key: bool,
    pub distinct: usize,
}

/// Differential-privacy knobs forwarded to the engine untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DpParams {
    pub epsilon: Option<f64>,
    pub max_parents: Option<usize>,
}

impl DpParams {
    pub fn validate(&self) -> Result<(), SynthError> {
        if let Some(epsilon) = self.epsilon {
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(SynthError::InvalidParameter {
                    name: "epsilon".to_string(),
                    reason: "must be finite and greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthSchema {
    pub columns: Vec<ColumnSchema>,
    pub category_threshold: usize,
    #[serde(default)]
    pub dp: DpParams,
}

impl SynthSchema {
    /// Describe every column of `table`. A column is categorical when its
    /// distinct non-null count is at most `category_threshold`.
    pub fn infer(table: &Table, category_threshold: usize) -> Self {
        let rows = table.row_count();
        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let (distinct, nulls) = distinct_and_nulls(column);
                ColumnSchema {
                    name: column.name().to_string(),
                    data_type: column.column_type(),
                    categorical: distinct <= category_threshold,
                    candidate_key: rows > 0 && nulls == 0 && distinct == rows,
                    distinct,
                }
            })
            .collect();
        Self {
            columns,
            category_threshold,
            dp: DpParams::default(),
        }
    }

    /// Infer with the configured threshold, or with the distinct count of
    /// `reference_column` when none is configured, and attach the DP knobs.
    pub fn from_config(
        table: &Table,
        config: &SynthConfig,
        reference_column: &str,
    ) -> Result<Self, SynthError> {
        let threshold = match config.category_threshold {
            Some(threshold) => threshold,
            None => distinct_and_nulls(table.column(reference_column)?).0,
        };
        let dp = DpParams {
            epsilon: config.epsilon,
            max_parents: config.max_parents,
        };
        dp.validate()?;
        Ok(Self::infer(table, threshold).with_dp(dp))
    }

    pub fn with_dp(mut self, dp: DpParams) -> Self {
        self.dp = dp;
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.categorical)
    }
}

fn distinct_and_nulls(column: &Column) -> (usize, usize) {
    let mut seen = FxHashSet::default();
    let mut nulls = 0;
    for row in 0..column.len() {
        match column.render(row) {
            Some(value) => {
                seen.insert(value);
            }
            None => nulls += 1,
        }
    }
    (seen.len(), nulls)
}
