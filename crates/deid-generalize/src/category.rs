//! Closed-set categorical filter: rows outside the set are excluded, not
//! coarsened.

use std::collections::BTreeSet;

use deid_core::errors::GeneralizeError;
use deid_core::table::Table;

#[derive(Debug, Clone)]
pub struct CategoryFilter {
    allowed: BTreeSet<String>,
}

impl CategoryFilter {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.allowed.contains(v))
    }

    /// Keep rows whose `column` value is in the set. Nulls are excluded.
    /// Returns the filtered table and the number of rows removed.
    pub fn apply(&self, table: Table, column: &str) -> Result<(Table, usize), GeneralizeError> {
        let source = table.column(column)?;
        let keep: Vec<bool> = (0..table.row_count())
            .map(|row| self.allows(source.render(row).as_deref()))
            .collect();
        let before = table.row_count();
        let table = table.filter_rows(|row| keep[row]);
        let excluded = before - table.row_count();
        Ok((table, excluded))
    }
}
