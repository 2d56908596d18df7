//! Run-level errors. Any of these aborts the run with no output written.

use super::error_code::{self, DeidErrorCode};
use super::{ConfigError, GeneralizeError, SynthError, TableError};

/// Errors that can end a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("stage `{stage}` failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: GeneralizeError,
    },

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Generalization error: {0}")]
    Generalize(#[from] GeneralizeError),

    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("run cancelled before stage `{stage}`")]
    Cancelled { stage: String },
}

impl PipelineError {
    /// Wrap a stage failure with the stage's name.
    pub fn in_stage(stage: impl Into<String>, source: GeneralizeError) -> Self {
        Self::Stage {
            stage: stage.into(),
            source,
        }
    }
}

impl DeidErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Stage { source, .. } => source.error_code(),
            Self::Table(e) => e.error_code(),
            Self::Generalize(e) => e.error_code(),
            Self::Synth(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Cancelled { .. } => error_code::CANCELLED,
        }
    }
}
