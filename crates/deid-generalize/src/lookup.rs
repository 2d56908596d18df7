//! Reference lookups: postcode → (area, deprivation score), and the location
//! join built on them.

use deid_core::config::{JoinMissPolicy, ReferenceConfig};
use deid_core::errors::GeneralizeError;
use deid_core::table::{Column, ColumnData, Table};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::decile::DecileBoundaries;

/// What a reference key generalizes to.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupEntry {
    pub area: String,
    pub score: Option<f64>,
}

/// Read-only key → entry table built once per run.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    keys: Vec<String>,
    entries: Vec<LookupEntry>,
    positions: FxHashMap<String, usize>,
}

/// Output of [`LookupIndex::join`].
#[derive(Debug)]
pub struct LocationJoin {
    pub table: Table,
    /// Rows whose key had no entry (dropped or imputed, per policy).
    pub misses: usize,
}

impl LookupIndex {
    /// Index the reference table by `columns.key`. The first row for a key
    /// wins; rows with a null key or area are skipped.
    pub fn build(reference: &Table, columns: &ReferenceConfig) -> Result<Self, GeneralizeError> {
        let keys = reference.column(&columns.key)?;
        let areas = reference.column(&columns.area)?;
        let scores = reference.column(&columns.score)?.to_floats()?;

        let mut index = Self::default();
        let mut duplicates = 0usize;
        let mut skipped = 0usize;
        for (row, score) in scores.into_iter().enumerate() {
            let (Some(key), Some(area)) = (keys.render(row), areas.render(row)) else {
                skipped += 1;
                continue;
            };
            if index.positions.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            index.positions.insert(key.clone(), index.keys.len());
            index.keys.push(key);
            index.entries.push(LookupEntry { area, score });
        }

        debug!(
            entries = index.len(),
            duplicates, skipped, "built reference lookup index"
        );
        Ok(index)
    }

    pub fn get(&self, key: &str) -> Option<&LookupEntry> {
        self.positions.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `area_column` and `score_column` looked up through `key_column`.
    ///
    /// Misses follow `policy`: `Drop` removes the row, `Fail` returns
    /// `JoinMiss` for the first one, `Impute` keeps the row with
    /// `impute_label` as its area and a null score. The key column stays.
    pub fn join(
        &self,
        table: Table,
        key_column: &str,
        area_column: &str,
        score_column: &str,
        policy: JoinMissPolicy,
        impute_label: &str,
    ) -> Result<LocationJoin, GeneralizeError> {
        let (table, misses) = match policy {
            JoinMissPolicy::Impute => {
                self.join_imputing(table, key_column, area_column, score_column, impute_label)?
            }
            JoinMissPolicy::Drop | JoinMissPolicy::Fail => {
                let right = self.to_table(key_column, area_column, score_column)?;
                let outcome =
                    table.inner_join(&right, key_column, key_column, &[area_column, score_column])?;
                if policy == JoinMissPolicy::Fail {
                    if let Some(&row) = outcome.unmatched.first() {
                        return Err(GeneralizeError::JoinMiss {
                            key: table.column(key_column)?.render(row).unwrap_or_default(),
                            row,
                        });
                    }
                }
                (outcome.table, outcome.unmatched.len())
            }
        };

        if misses > 0 {
            warn!(
                misses,
                policy = ?policy,
                "rows without a reference match"
            );
        }
        Ok(LocationJoin { table, misses })
    }

    /// The indexed entries as a three-column table, one row per key.
    pub fn to_table(
        &self,
        key_column: &str,
        area_column: &str,
        score_column: &str,
    ) -> Result<Table, GeneralizeError> {
        let keys = self.keys.iter().cloned().map(Some).collect();
        let areas = self.entries.iter().map(|e| Some(e.area.clone())).collect();
        let scores = self.entries.iter().map(|e| e.score).collect();
        Ok(Table::from_columns(vec![
            Column::new(key_column, ColumnData::String(keys)),
            Column::new(area_column, ColumnData::String(areas)),
            Column::new(score_column, ColumnData::Float(scores)),
        ])?)
    }

    /// Left join keeping every row; misses get `impute_label` and a null score.
    fn join_imputing(
        &self,
        table: Table,
        key_column: &str,
        area_column: &str,
        score_column: &str,
        impute_label: &str,
    ) -> Result<(Table, usize), GeneralizeError> {
        let keys = table.column(key_column)?;
        let rows = table.row_count();

        let mut areas = Vec::with_capacity(rows);
        let mut scores = Vec::with_capacity(rows);
        let mut misses = 0usize;
        for row in 0..rows {
            match keys.render(row).as_deref().and_then(|k| self.get(k)) {
                Some(entry) => {
                    areas.push(Some(entry.area.clone()));
                    scores.push(entry.score);
                }
                None => {
                    areas.push(Some(impute_label.to_string()));
                    scores.push(None);
                    misses += 1;
                }
            }
        }

        let mut table = table;
        table.add_column(area_column, ColumnData::String(areas))?;
        table.add_column(score_column, ColumnData::Float(scores))?;
        Ok((table, misses))
    }
}

/// Lookup index plus decile boundaries, both derived from the reference table
/// once and shared read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    lookup: LookupIndex,
    deciles: DecileBoundaries,
}

impl ReferenceData {
    /// Build the index and compute deciles over every non-null reference score.
    pub fn build(reference: &Table, columns: &ReferenceConfig) -> Result<Self, GeneralizeError> {
        let lookup = LookupIndex::build(reference, columns)?;
        let scores: Vec<f64> = reference
            .column(&columns.score)?
            .to_floats()?
            .into_iter()
            .flatten()
            .collect();
        let deciles = DecileBoundaries::from_scores(&scores).ok_or_else(|| {
            GeneralizeError::EmptyReference {
                column: columns.score.clone(),
            }
        })?;
        debug!(
            population = scores.len(),
            min = deciles.min(),
            max = deciles.max(),
            "computed decile boundaries"
        );
        Ok(Self { lookup, deciles })
    }

    pub fn lookup(&self) -> &LookupIndex {
        &self.lookup
    }

    pub fn deciles(&self) -> &DecileBoundaries {
        &self.deciles
    }
}
