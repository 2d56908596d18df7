//! Delimited-file adapter for [`Table`].
//!
//! Column types are inferred from the cells: integer when every non-empty
//! cell parses as `i64`, float when every non-empty cell parses as a finite
//! `f64`, string otherwise. A single cell with a leading zero ("007") makes
//! the whole column a string column. Empty cells are null.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use super::{Column, ColumnData, Table};
use crate::errors::TableError;

impl Table {
    /// Read a headed CSV file.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
        let table = Self::from_csv_reader(file).map_err(|e| relabel(e, path))?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "read table"
        );
        Ok(table)
    }

    /// Read headed CSV from any reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            for (i, column) in cells.iter_mut().enumerate() {
                let value = record.get(i).unwrap_or("");
                column.push(if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                });
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| Column::new(name, infer(raw)))
            .collect();
        Self::from_columns(columns)
    }

    /// Write the table as headed CSV. Null cells become empty fields.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| io_error(path, e))?;
        self.to_csv_writer(file).map_err(|e| relabel(e, path))?;
        debug!(path = %path.display(), rows = self.row_count(), "wrote table");
        Ok(())
    }

    /// Write headed CSV to any writer.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.column_names()).map_err(csv_error)?;
        for row in 0..self.row_count() {
            let record: Vec<String> = self
                .columns()
                .iter()
                .map(|c| c.render(row).unwrap_or_default())
                .collect();
            writer.write_record(&record).map_err(csv_error)?;
        }
        writer.flush().map_err(|e| TableError::Io {
            path: "<writer>".to_string(),
            message: e.to_string(),
        })
    }
}

fn infer(raw: Vec<Option<String>>) -> ColumnData {
    if raw.iter().all(Option::is_none) || raw.iter().flatten().any(|s| has_leading_zero(s)) {
        return ColumnData::String(raw);
    }
    let integral = raw.iter().flatten().all(|s| s.parse::<i64>().is_ok());
    let numeric = integral || raw.iter().flatten().all(|s| parses_finite(s));

    if integral {
        ColumnData::Integer(
            raw.iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        )
    } else if numeric {
        ColumnData::Float(
            raw.iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        )
    } else {
        ColumnData::String(raw)
    }
}

/// "007" or "-01234", but not "0", "0.5" or "-0.25".
fn has_leading_zero(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s).as_bytes();
    digits.len() > 1 && digits[0] == b'0' && digits[1].is_ascii_digit()
}

/// `f64::from_str` also accepts "nan", "inf" and "infinity".
fn parses_finite(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn csv_error(e: csv::Error) -> TableError {
    TableError::Io {
        path: "<csv>".to_string(),
        message: e.to_string(),
    }
}

fn io_error(path: &Path, e: std::io::Error) -> TableError {
    TableError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn relabel(err: TableError, path: &Path) -> TableError {
    match err {
        TableError::Io { message, .. } => TableError::Io {
            path: path.display().to_string(),
            message,
        },
        other => other,
    }
}
