//! Generalization errors: lookups, binning, pseudonyms and value domains.

use super::error_code::{self, DeidErrorCode};
use super::TableError;

/// Errors raised while generalizing or pseudonymizing a table.
#[derive(Debug, thiserror::Error)]
pub enum GeneralizeError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("no reference entry for key `{key}` (row {row})")]
    JoinMiss { key: String, row: usize },

    #[error("join on `{column}` matched no rows")]
    EmptyJoin { column: String },

    #[error("reference column `{column}` holds no usable values")]
    EmptyReference { column: String },

    #[error("value `{value}` in column `{column}` at row {row} is outside the allowed domain")]
    OutOfDomain {
        column: String,
        row: usize,
        value: String,
    },

    #[error("{distinct} distinct values do not fit in {capacity} available ids")]
    IdSpaceExhausted { distinct: usize, capacity: u64 },
}

impl DeidErrorCode for GeneralizeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Table(e) => e.error_code(),
            Self::JoinMiss { .. } => error_code::JOIN_MISS,
            Self::EmptyJoin { .. } => error_code::EMPTY_JOIN,
            Self::EmptyReference { .. } => error_code::CONFIG_ERROR,
            Self::OutOfDomain { .. } => error_code::OUT_OF_DOMAIN,
            Self::IdSpaceExhausted { .. } => error_code::ID_SPACE_EXHAUSTED,
        }
    }
}
