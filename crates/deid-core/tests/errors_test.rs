use deid_core::errors::*;

#[test]
fn missing_column_carries_name_and_code() {
    let err = TableError::MissingColumn {
        column: "Postcode".into(),
    };
    assert!(err.to_string().contains("Postcode"));
    assert_eq!(err.error_code(), "MISSING_COLUMN");
    assert_eq!(err.coded_message(), "[MISSING_COLUMN] missing column `Postcode`");
}

#[test]
fn parse_failure_carries_row_and_value() {
    let err = TableError::ParseFailure {
        column: "Arrival Time".into(),
        row: 12,
        value: "yesterday".into(),
        reason: "bad timestamp".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("yesterday"));
    assert!(msg.contains("12"));
    assert_eq!(err.error_code(), "PARSE_FAILURE");
}

#[test]
fn generalize_error_forwards_table_codes() {
    let err: GeneralizeError = TableError::MissingColumn {
        column: "Age".into(),
    }
    .into();
    assert_eq!(err.error_code(), "MISSING_COLUMN");
    assert_eq!(err.to_string(), "missing column `Age`");
}

#[test]
fn join_miss_has_its_own_code() {
    let err = GeneralizeError::JoinMiss {
        key: "E1 6AN".into(),
        row: 3,
    };
    assert_eq!(err.error_code(), "JOIN_MISS");
    assert!(err.to_string().contains("E1 6AN"));
}

#[test]
fn stage_error_keeps_source_code_and_stage_name() {
    let err = PipelineError::in_stage(
        "generalize_arrival",
        GeneralizeError::Table(TableError::ParseFailure {
            column: "Arrival Time".into(),
            row: 0,
            value: "x".into(),
            reason: "bad".into(),
        }),
    );
    assert_eq!(err.error_code(), "PARSE_FAILURE");
    assert!(err.to_string().contains("generalize_arrival"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn degenerate_distribution_code() {
    let err = SynthError::DegenerateDistribution {
        reason: "sigma is zero".into(),
    };
    assert_eq!(err.error_code(), "DEGENERATE_DISTRIBUTION");
    let err: PipelineError = err.into();
    assert_eq!(err.error_code(), "DEGENERATE_DISTRIBUTION");
}

#[test]
fn cancelled_names_the_next_stage() {
    let err = PipelineError::Cancelled {
        stage: "bracket_age".into(),
    };
    assert_eq!(err.error_code(), "CANCELLED");
    assert!(err.to_string().contains("bracket_age"));
}
