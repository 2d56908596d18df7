//! Table-layer errors: schema mismatches, cell parsing and file I/O.

use super::error_code::{self, DeidErrorCode};

/// Errors raised by the table abstraction and its file adapters.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("missing column `{column}`")]
    MissingColumn { column: String },

    #[error("column `{column}` already exists")]
    DuplicateColumn { column: String },

    #[error("column `{column}` has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column `{column}` is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("cannot parse `{value}` in column `{column}` at row {row}: {reason}")]
    ParseFailure {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl DeidErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::DuplicateColumn { .. } => error_code::DUPLICATE_COLUMN,
            Self::LengthMismatch { .. } | Self::TypeMismatch { .. } => {
                error_code::SCHEMA_MISMATCH
            }
            Self::ParseFailure { .. } => error_code::PARSE_FAILURE,
            Self::Io { .. } => error_code::IO_ERROR,
        }
    }
}
