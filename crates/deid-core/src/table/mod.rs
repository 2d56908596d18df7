//! In-memory tabular data: ordered named columns of one semantic type each.
//!
//! Every pipeline stage is composed from four primitives on [`Table`]:
//! [`Table::add_column`], [`Table::drop_column`], [`Table::inner_join`] and
//! [`Table::filter_rows`]. Nothing here knows about any particular dataset.

pub mod column;
pub mod csv_io;

pub use column::{Column, ColumnData, ColumnType, DATE_FORMAT};

use rustc_hash::FxHashMap;

use crate::errors::TableError;

/// Ordered collection of equally long, named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

/// Result of [`Table::inner_join`].
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Matched rows, left columns followed by the appended right columns.
    pub table: Table,
    /// Left-table row indices that found no match, in ascending order.
    pub unmatched: Vec<usize>,
}

impl Table {
    /// Create an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking names and lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.position(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| missing(name))
    }

    /// Fail with `MissingColumn` for the first absent name.
    pub fn require(&self, names: &[&str]) -> Result<(), TableError> {
        match names.iter().find(|n| !self.has_column(n)) {
            Some(name) => Err(missing(name)),
            None => Ok(()),
        }
    }

    /// Append a column at the end.
    pub fn add_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<(), TableError> {
        self.push_column(Column::new(name, data))
    }

    /// Remove a column and hand it back.
    pub fn drop_column(&mut self, name: &str) -> Result<Column, TableError> {
        let index = self.position(name).ok_or_else(|| missing(name))?;
        Ok(self.columns.remove(index))
    }

    /// Keep only the rows for which `keep(row)` returns true. Order is preserved.
    pub fn filter_rows(self, mut keep: impl FnMut(usize) -> bool) -> Table {
        let selected: Vec<usize> = (0..self.rows).filter(|&row| keep(row)).collect();
        self.take_rows(&selected)
    }

    /// New table holding the given rows, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name(), c.data().take(rows)))
                .collect(),
            rows: rows.len(),
        }
    }

    /// Inner join on a single key.
    ///
    /// Keys compare on their rendered text, so an integer key on one side
    /// matches the same digits stored as a string on the other. Null keys never
    /// match. When the right table repeats a key, its first row is used, so the
    /// result never has more rows than `self`.
    pub fn inner_join(
        &self,
        right: &Table,
        left_key: &str,
        right_key: &str,
        append: &[&str],
    ) -> Result<JoinOutcome, TableError> {
        let left_keys = self.column(left_key)?;
        let right_keys = right.column(right_key)?;
        right.require(append)?;
        if let Some(dup) = append.iter().find(|n| self.has_column(n)) {
            return Err(TableError::DuplicateColumn {
                column: (*dup).to_string(),
            });
        }

        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for row in 0..right.row_count() {
            if let Some(key) = right_keys.render(row) {
                index.entry(key).or_insert(row);
            }
        }

        let mut matched_left = Vec::with_capacity(self.rows);
        let mut matched_right = Vec::with_capacity(self.rows);
        let mut unmatched = Vec::new();
        for row in 0..self.rows {
            match left_keys.render(row).and_then(|k| index.get(&k).copied()) {
                Some(r) => {
                    matched_left.push(row);
                    matched_right.push(r);
                }
                None => unmatched.push(row),
            }
        }

        let mut table = self.take_rows(&matched_left);
        for name in append {
            let column = right.column(name)?;
            table.add_column(*name, column.data().take(&matched_right))?;
        }
        Ok(JoinOutcome { table, unmatched })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.has_column(column.name()) {
            return Err(TableError::DuplicateColumn {
                column: column.name().to_string(),
            });
        }
        if self.columns.is_empty() && self.rows == 0 {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(TableError::LengthMismatch {
                column: column.name().to_string(),
                expected: self.rows,
                actual: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }
}

fn missing(name: &str) -> TableError {
    TableError::MissingColumn {
        column: name.to_string(),
    }
}
