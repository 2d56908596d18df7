//! Typed, nullable columns.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::TableError;

/// Date rendering used everywhere a date is turned into text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Cell storage for one column. `None` is a null cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    String(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::String(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::String(_) => ColumnType::String,
            Self::Integer(_) => ColumnType::Integer,
            Self::Float(_) => ColumnType::Float,
            Self::Date(_) => ColumnType::Date,
        }
    }

    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Self::String(v) => v[row].is_none(),
            Self::Integer(v) => v[row].is_none(),
            Self::Float(v) => v[row].is_none(),
            Self::Date(v) => v[row].is_none(),
        }
    }

    /// Text form of a cell, used for join keys and file output.
    pub fn render(&self, row: usize) -> Option<String> {
        match self {
            Self::String(v) => v[row].clone(),
            Self::Integer(v) => v[row].map(|x| x.to_string()),
            Self::Float(v) => v[row].map(|x| x.to_string()),
            Self::Date(v) => v[row].map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }

    /// New column holding the given rows, in the given order.
    pub fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::String(v) => Self::String(rows.iter().map(|&r| v[r].clone()).collect()),
            Self::Integer(v) => Self::Integer(rows.iter().map(|&r| v[r]).collect()),
            Self::Float(v) => Self::Float(rows.iter().map(|&r| v[r]).collect()),
            Self::Date(v) => Self::Date(rows.iter().map(|&r| v[r]).collect()),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn render(&self, row: usize) -> Option<String> {
        self.data.render(row)
    }

    /// Borrow the cells of a string column.
    pub fn as_strings(&self) -> Result<&[Option<String>], TableError> {
        match &self.data {
            ColumnData::String(v) => Ok(v),
            other => Err(self.type_mismatch(ColumnType::String, other.column_type())),
        }
    }

    /// Cells as floats. Integer columns widen; string cells must parse.
    pub fn to_floats(&self) -> Result<Vec<Option<f64>>, TableError> {
        match &self.data {
            ColumnData::Float(v) => Ok(v.clone()),
            ColumnData::Integer(v) => Ok(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            ColumnData::String(v) => v
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    None => Ok(None),
                    Some(s) => s
                        .trim()
                        .parse::<f64>()
                        .map(Some)
                        .map_err(|e| self.parse_failure(row, s, e.to_string())),
                })
                .collect(),
            ColumnData::Date(_) => Err(self.type_mismatch(ColumnType::Float, ColumnType::Date)),
        }
    }

    /// Cells as integers. Float cells must be integral; string cells must parse.
    pub fn to_integers(&self) -> Result<Vec<Option<i64>>, TableError> {
        match &self.data {
            ColumnData::Integer(v) => Ok(v.clone()),
            ColumnData::Float(v) => v
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    None => Ok(None),
                    Some(x) if x.fract() == 0.0 && x.is_finite() => Ok(Some(*x as i64)),
                    Some(x) => Err(self.parse_failure(row, &x.to_string(), "not an integer")),
                })
                .collect(),
            ColumnData::String(v) => v
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    None => Ok(None),
                    Some(s) => s
                        .trim()
                        .parse::<i64>()
                        .map(Some)
                        .map_err(|e| self.parse_failure(row, s, e.to_string())),
                })
                .collect(),
            ColumnData::Date(_) => {
                Err(self.type_mismatch(ColumnType::Integer, ColumnType::Date))
            }
        }
    }

    fn type_mismatch(&self, expected: ColumnType, actual: ColumnType) -> TableError {
        TableError::TypeMismatch {
            column: self.name.clone(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    fn parse_failure(&self, row: usize, value: &str, reason: impl Into<String>) -> TableError {
        TableError::ParseFailure {
            column: self.name.clone(),
            row,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
