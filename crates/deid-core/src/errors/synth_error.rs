//! Synthesis errors: distribution parameters and the external engine boundary.

use super::error_code::{self, DeidErrorCode};
use super::TableError;

/// Errors raised by the correlated sampler and the synthetic-engine adapter.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("degenerate distribution: {reason}")]
    DegenerateDistribution { reason: String },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("synthetic table does not match the source: {details}")]
    SchemaMismatch { details: String },

    #[error("synthetic engine failed: {message}")]
    Engine { message: String },

    #[error(transparent)]
    Table(#[from] TableError),
}

impl DeidErrorCode for SynthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateDistribution { .. } => error_code::DEGENERATE_DISTRIBUTION,
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
            Self::SchemaMismatch { .. } => error_code::SCHEMA_MISMATCH,
            Self::Engine { .. } => error_code::ENGINE_ERROR,
            Self::Table(e) => e.error_code(),
        }
    }
}
