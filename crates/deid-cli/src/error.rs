//! Rendering of failures for the terminal.

use deid_core::errors::{
    ConfigError, DeidErrorCode, GeneralizeError, PipelineError, SynthError, TableError,
};

/// `[CODE] message` when the root of `err` is one of the library error
/// types, the plain message chain otherwise.
pub fn coded(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<SynthError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<GeneralizeError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<TableError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return e.coded_message();
    }
    format!("{err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_carry_their_code() {
        let err = anyhow::Error::from(TableError::MissingColumn {
            column: "Age".to_string(),
        });
        assert_eq!(coded(&err), "[MISSING_COLUMN] missing column `Age`");

        let err = anyhow::Error::from(PipelineError::Cancelled {
            stage: "bracket_age".to_string(),
        });
        assert!(coded(&err).starts_with("[CANCELLED]"));
    }

    #[test]
    fn other_errors_print_their_chain() {
        let err = anyhow::anyhow!("disk full").context("writing output");
        assert_eq!(coded(&err), "writing output: disk full");
    }
}
