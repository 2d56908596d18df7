//! Integer ages → fixed brackets.

use deid_core::constants::AGE_BRACKETS;
use deid_core::errors::{GeneralizeError, TableError};
use deid_core::table::{ColumnData, Table};

/// Bracket label for an age, ranges closed below and open above. `None` for
/// negative ages.
pub fn age_bracket(age: i64) -> Option<&'static str> {
    AGE_BRACKETS
        .iter()
        .rev()
        .find(|(lower, _)| age >= *lower)
        .map(|(_, label)| *label)
}

/// Replace `column` by `bracket_column`. Null or negative ages fail the table.
pub fn bracket_ages(
    table: Table,
    column: &str,
    bracket_column: &str,
) -> Result<Table, GeneralizeError> {
    let mut table = table;
    let ages = table.column(column)?.to_integers()?;

    let mut brackets = Vec::with_capacity(ages.len());
    for (row, age) in ages.into_iter().enumerate() {
        let age = age.ok_or_else(|| TableError::ParseFailure {
            column: column.to_string(),
            row,
            value: String::new(),
            reason: "missing age".to_string(),
        })?;
        let label = age_bracket(age).ok_or_else(|| GeneralizeError::OutOfDomain {
            column: column.to_string(),
            row,
            value: age.to_string(),
        })?;
        brackets.push(Some(label.to_string()));
    }

    table.add_column(bracket_column, ColumnData::String(brackets))?;
    table.drop_column(column)?;
    Ok(table)
}
