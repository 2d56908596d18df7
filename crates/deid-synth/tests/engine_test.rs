use deid_core::config::SynthConfig;
use deid_core::errors::SynthError;
use deid_core::table::{Column, ColumnData, ColumnType, Table};
use deid_synth::{
    compare_marginals, synthesize_with, IndependentEngine, SynthDescription, SynthSchema,
    SyntheticEngine,
};

fn generalized() -> Table {
    let n = 40;
    Table::from_columns(vec![
        Column::new(
            "Row",
            ColumnData::Integer((1..=n).map(Some).collect()),
        ),
        Column::new(
            "Treatment",
            ColumnData::String(
                (0..n)
                    .map(|i| Some(["Dressing", "Sutures", "Observation"][i as usize % 3].to_string()))
                    .collect(),
            ),
        ),
        Column::new(
            "Gender",
            ColumnData::String((0..n).map(|i| Some(if i % 2 == 0 { "Male" } else { "Female" }.to_string())).collect()),
        ),
        Column::new(
            "Time in A&E (mins)",
            ColumnData::Integer((0..n).map(|i| if i == 0 { None } else { Some(10 + i * 3) }).collect()),
        ),
        Column::new(
            "Arrival Date",
            ColumnData::Date(
                (0..n)
                    .map(|i| chrono::NaiveDate::from_ymd_opt(2019, 4, 1 + (i as u32 % 6)))
                    .collect(),
            ),
        ),
    ])
    .unwrap()
}

#[test]
fn schema_flags_categories_and_keys() {
    let schema = SynthSchema::infer(&generalized(), 3);
    let treatment = schema.column("Treatment").unwrap();
    assert!(treatment.categorical);
    assert_eq!(treatment.distinct, 3);
    assert_eq!(treatment.data_type, ColumnType::String);

    let row = schema.column("Row").unwrap();
    assert!(!row.categorical);
    assert!(row.candidate_key);

    let duration = schema.column("Time in A&E (mins)").unwrap();
    assert!(!duration.candidate_key, "a null disqualifies a key");
    assert!(!schema.column("Arrival Date").unwrap().categorical);
}

#[test]
fn default_threshold_is_the_treatment_count() {
    let schema =
        SynthSchema::from_config(&generalized(), &SynthConfig::default(), "Treatment").unwrap();
    assert_eq!(schema.category_threshold, 3);
    let categorical: Vec<&str> = schema.categorical_columns().map(|c| c.name.as_str()).collect();
    assert_eq!(categorical, vec!["Treatment", "Gender"]);
}

#[test]
fn configured_threshold_and_dp_parameters_win() {
    let config = SynthConfig {
        category_threshold: Some(6),
        epsilon: Some(0.1),
        max_parents: Some(2),
        ..SynthConfig::default()
    };
    let schema = SynthSchema::from_config(&generalized(), &config, "Treatment").unwrap();
    assert_eq!(schema.category_threshold, 6);
    assert_eq!(schema.dp.epsilon, Some(0.1));
    assert_eq!(schema.dp.max_parents, Some(2));
    assert!(schema.column("Arrival Date").unwrap().categorical);

    let bad = SynthConfig {
        epsilon: Some(0.0),
        ..SynthConfig::default()
    };
    let err = SynthSchema::from_config(&generalized(), &bad, "Treatment").unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameter { .. }));
}

#[test]
fn schema_roundtrips_through_json() {
    let schema = SynthSchema::infer(&generalized(), 3);
    let json = serde_json::to_string(&schema).unwrap();
    let back: SynthSchema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
}

#[test]
fn independent_engine_keeps_columns_types_and_domains() {
    let source = generalized();
    let schema = SynthSchema::infer(&source, 3);
    let engine = IndependentEngine::new(Some(4));
    let output = synthesize_with(&engine, &source, &schema, 200).unwrap();

    let table = output.table;
    assert_eq!(table.row_count(), 200);
    assert_eq!(table.column_names(), source.column_names());
    for column in source.columns() {
        assert_eq!(table.column(column.name()).unwrap().column_type(), column.column_type());
    }

    let treatments = table.column("Treatment").unwrap().as_strings().unwrap();
    assert!(treatments.iter().all(|t| matches!(
        t.as_deref(),
        Some("Dressing") | Some("Sutures") | Some("Observation")
    )));

    let durations = table.column("Time in A&E (mins)").unwrap().to_integers().unwrap();
    assert!(durations.iter().flatten().all(|d| (13..=127).contains(d)));

    let rows = table.column("Row").unwrap().to_integers().unwrap();
    assert_eq!(rows[0], Some(1));
    assert_eq!(rows[199], Some(200));
    assert_eq!(output.description.source_rows, 40);
}

#[test]
fn marginal_distance_is_zero_for_identical_tables_and_small_for_uniform_draws() {
    let source = generalized();
    let schema = SynthSchema::infer(&source, 3);
    let same = compare_marginals(&source, &source, &schema).unwrap();
    assert_eq!(same.len(), 2);
    assert!(same.iter().all(|m| m.distance == 0.0));

    let engine = IndependentEngine::new(Some(8));
    let output = synthesize_with(&engine, &source, &schema, 5_000).unwrap();
    let drift = compare_marginals(&source, &output.table, &schema).unwrap();
    assert!(drift.iter().all(|m| m.distance < 0.05), "{drift:?}");
}

#[test]
fn disjoint_marginals_are_maximally_distant() {
    let a = Table::from_columns(vec![Column::new(
        "c",
        ColumnData::String(vec![Some("x".into()), Some("x".into())]),
    )])
    .unwrap();
    let b = Table::from_columns(vec![Column::new(
        "c",
        ColumnData::String(vec![Some("y".into()), None]),
    )])
    .unwrap();
    let schema = SynthSchema::infer(&a, 5);
    let result = compare_marginals(&a, &b, &schema).unwrap();
    assert!((result[0].distance - 1.0).abs() < 1e-12);
}

/// Returns the wrong shape to exercise the checks in `synthesize_with`.
struct ShortEngine;

impl SyntheticEngine for ShortEngine {
    fn name(&self) -> &'static str {
        "short"
    }

    fn describe(&self, table: &Table, schema: &SynthSchema) -> Result<SynthDescription, SynthError> {
        Ok(SynthDescription {
            engine: self.name().to_string(),
            source_rows: table.row_count(),
            schema: schema.clone(),
            attributes: serde_json::Value::Null,
        })
    }

    fn generate(&self, _description: &SynthDescription, rows: usize) -> Result<Table, SynthError> {
        Ok(Table::from_columns(vec![Column::new(
            "Treatment",
            ColumnData::String(vec![None; rows.saturating_sub(1)]),
        )])?)
    }
}

#[test]
fn mismatched_engine_output_is_rejected() {
    let source = generalized();
    let schema = SynthSchema::infer(&source, 3);
    let err = synthesize_with(&ShortEngine, &source, &schema, 10).unwrap_err();
    assert!(matches!(err, SynthError::SchemaMismatch { .. }));

    let one_column = Table::from_columns(vec![source.column("Treatment").unwrap().clone()]).unwrap();
    let schema = SynthSchema::infer(&one_column, 3);
    let err = synthesize_with(&ShortEngine, &one_column, &schema, 10).unwrap_err();
    assert!(err.to_string().contains("requested 10 rows"));
}

#[test]
fn description_from_another_engine_is_refused() {
    let source = generalized();
    let schema = SynthSchema::infer(&source, 3);
    let description = ShortEngine.describe(&source, &schema).unwrap();
    let err = IndependentEngine::default().generate(&description, 5).unwrap_err();
    assert!(matches!(err, SynthError::Engine { .. }));
}
