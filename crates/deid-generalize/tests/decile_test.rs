use deid_core::config::ReferenceConfig;
use deid_generalize::{DecileBoundaries, ReferenceData};
use test_fixtures::reference_table;

#[test]
fn hundred_scores_split_into_ten_groups_of_ten() {
    let scores: Vec<f64> = (1..=100).map(f64::from).collect();
    let bounds = DecileBoundaries::from_scores(&scores).unwrap();

    let mut counts = [0usize; 10];
    for &s in &scores {
        let decile = bounds.classify(s).unwrap();
        counts[decile as usize - 1] += 1;
    }
    assert_eq!(counts, [10; 10]);
    assert_eq!(bounds.classify(5.0), Some(1));
    assert_eq!(bounds.classify(95.0), Some(10));
}

#[test]
fn minimum_is_included_in_first_decile() {
    let bounds = DecileBoundaries::from_scores(&[3.0, 7.0, 9.0, 12.0]).unwrap();
    assert_eq!(bounds.min(), 3.0);
    assert_eq!(bounds.classify(3.0), Some(1));
    assert_eq!(bounds.classify(12.0), Some(10));
}

#[test]
fn boundary_ties_go_to_the_lower_decile() {
    let scores: Vec<f64> = (0..=10).map(f64::from).collect();
    let bounds = DecileBoundaries::from_scores(&scores).unwrap();
    // n - 1 = 10, so every cut lands exactly on a score.
    assert_eq!(bounds.cut_points(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    assert_eq!(bounds.classify(1.0), Some(1));
    assert_eq!(bounds.classify(1.0001), Some(2));
    assert_eq!(bounds.classify(9.0), Some(9));
    assert_eq!(bounds.classify(10.0), Some(10));
}

#[test]
fn out_of_range_scores_clamp_to_the_outer_deciles() {
    let scores: Vec<f64> = (1..=50).map(f64::from).collect();
    let bounds = DecileBoundaries::from_scores(&scores).unwrap();
    assert_eq!(bounds.classify(-100.0), Some(1));
    assert_eq!(bounds.classify(1e9), Some(10));
}

#[test]
fn classify_all_keeps_nulls() {
    let bounds = DecileBoundaries::from_scores(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(
        bounds.classify_all(&[Some(1.0), None, Some(3.0)]),
        vec![Some(1), None, Some(10)]
    );
}

#[test]
fn reference_data_computes_deciles_over_the_reference_population() {
    let reference = reference_table(100);
    let data = ReferenceData::build(&reference, &ReferenceConfig::default()).unwrap();
    assert_eq!(data.lookup().len(), 100);
    assert_eq!(data.deciles().min(), 1.0);
    assert_eq!(data.deciles().max(), 100.0);
    assert_eq!(data.deciles().classify(5.0), Some(1));
    assert_eq!(data.deciles().classify(95.0), Some(10));
}
