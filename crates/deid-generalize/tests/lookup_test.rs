use deid_core::config::{JoinMissPolicy, ReferenceConfig};
use deid_core::errors::GeneralizeError;
use deid_core::table::{Column, ColumnData, Table};
use deid_generalize::{LookupIndex, ReferenceData};
use test_fixtures::{area, postcode, raw_event_table, reference_table, RawEvent};

fn working() -> Table {
    raw_event_table(&[
        RawEvent::new(0, 1),
        RawEvent::new(1, 2).with_postcode("ZZ99 9ZZ"),
        RawEvent::new(2, 3),
    ])
}

fn join(policy: JoinMissPolicy) -> Result<deid_generalize::LocationJoin, GeneralizeError> {
    let index = LookupIndex::build(&reference_table(10), &ReferenceConfig::default()).unwrap();
    index.join(working(), "Postcode", "Area", "Score", policy, "UNKNOWN")
}

#[test]
fn drop_policy_removes_unmatched_rows() {
    let outcome = join(JoinMissPolicy::Drop).unwrap();
    assert_eq!(outcome.misses, 1);
    let table = outcome.table;
    assert_eq!(table.row_count(), 2);
    let areas = table.column("Area").unwrap().as_strings().unwrap().to_vec();
    assert_eq!(areas, vec![Some(area(1)), Some(area(3))]);
    assert_eq!(
        table.column("Score").unwrap().to_floats().unwrap(),
        vec![Some(1.0), Some(3.0)]
    );
    // The key column is left for the caller to drop.
    assert!(table.has_column("Postcode"));
}

#[test]
fn fail_policy_reports_the_first_miss() {
    let err = join(JoinMissPolicy::Fail).unwrap_err();
    match err {
        GeneralizeError::JoinMiss { key, row } => {
            assert_eq!(key, "ZZ99 9ZZ");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn impute_policy_keeps_rows_with_a_fixed_label() {
    let outcome = join(JoinMissPolicy::Impute).unwrap();
    assert_eq!(outcome.misses, 1);
    let table = outcome.table;
    assert_eq!(table.row_count(), 3);
    let areas = table.column("Area").unwrap().as_strings().unwrap().to_vec();
    assert_eq!(areas[1].as_deref(), Some("UNKNOWN"));
    assert_eq!(table.column("Score").unwrap().to_floats().unwrap()[1], None);
}

#[test]
fn first_reference_row_wins_for_duplicate_keys() {
    let reference = Table::from_columns(vec![
        Column::new(
            "Postcode",
            ColumnData::String(vec![Some(postcode(1)), Some(postcode(1)), None]),
        ),
        Column::new(
            "Lower layer super output area",
            ColumnData::String(vec![Some("first".into()), Some("second".into()), Some("x".into())]),
        ),
        Column::new(
            "Index of Multiple Deprivation",
            ColumnData::Integer(vec![Some(1), Some(2), Some(3)]),
        ),
    ])
    .unwrap();
    let index = LookupIndex::build(&reference, &ReferenceConfig::default()).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get(&postcode(1)).unwrap().area, "first");
}

#[test]
fn missing_reference_column_is_reported() {
    let mut reference = reference_table(5);
    reference.drop_column("Index of Multiple Deprivation").unwrap();
    let err = ReferenceData::build(&reference, &ReferenceConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Index of Multiple Deprivation"));
}

#[test]
fn reference_without_scores_is_rejected() {
    let reference = Table::from_columns(vec![
        Column::new("Postcode", ColumnData::String(vec![Some("A".into())])),
        Column::new(
            "Lower layer super output area",
            ColumnData::String(vec![Some("E1".into())]),
        ),
        Column::new("Index of Multiple Deprivation", ColumnData::Float(vec![None])),
    ])
    .unwrap();
    let err = ReferenceData::build(&reference, &ReferenceConfig::default()).unwrap_err();
    assert!(matches!(err, GeneralizeError::EmptyReference { .. }));
}

#[test]
fn drop_policy_matches_a_plain_inner_join() {
    let index = LookupIndex::build(&reference_table(10), &ReferenceConfig::default()).unwrap();
    let right = index.to_table("Postcode", "Area", "Score").unwrap();
    assert_eq!(right.row_count(), 10);

    let expected = working()
        .inner_join(&right, "Postcode", "Postcode", &["Area", "Score"])
        .unwrap();
    let outcome = join(JoinMissPolicy::Drop).unwrap();
    assert_eq!(outcome.table, expected.table);
    assert_eq!(outcome.misses, expected.unmatched.len());
}

#[test]
fn integer_keys_join_against_string_reference_keys() {
    let reference = Table::from_columns(vec![
        Column::new("Postcode", ColumnData::String(vec![Some("101".into()), Some("202".into())])),
        Column::new(
            "Lower layer super output area",
            ColumnData::String(vec![Some("E1".into()), Some("E2".into())]),
        ),
        Column::new(
            "Index of Multiple Deprivation",
            ColumnData::Integer(vec![Some(1), Some(2)]),
        ),
    ])
    .unwrap();
    let working = Table::from_columns(vec![Column::new(
        "Postcode",
        ColumnData::Integer(vec![Some(202), Some(303), None]),
    )])
    .unwrap();

    let index = LookupIndex::build(&reference, &ReferenceConfig::default()).unwrap();
    let outcome = index
        .join(working, "Postcode", "Area", "Score", JoinMissPolicy::Drop, "UNKNOWN")
        .unwrap();
    assert_eq!(outcome.misses, 2);
    assert_eq!(
        outcome.table.column("Area").unwrap().as_strings().unwrap(),
        &[Some("E2".to_string())]
    );
}
