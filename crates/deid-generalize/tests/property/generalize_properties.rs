//! Property tests for deid-generalize: decile balance, pseudonym bijection,
//! window and bracket partitions, sampling as a subsequence.

use std::collections::HashSet;

use proptest::prelude::*;

use deid_core::config::IdScheme;
use deid_core::constants::{AGE_BRACKETS, HOUR_RANGE_LABELS};
use deid_core::table::{Column, ColumnData, Table};
use deid_generalize::{age_bracket, bernoulli_sample, hour_range, DecileBoundaries, PseudonymMap};
use test_fixtures::seeded_rng;

// =============================================================================
// Distinct scores spread evenly: every decile holds n/10 ± 1 of them.
// =============================================================================
proptest! {
    #[test]
    fn deciles_are_balanced_for_distinct_scores(
        raw in prop::collection::hash_set(-100_000i32..100_000, 10..400)
    ) {
        let scores: Vec<f64> = raw.into_iter().map(f64::from).collect();
        let bounds = DecileBoundaries::from_scores(&scores).unwrap();

        let mut counts = [0usize; 10];
        for &s in &scores {
            let decile = bounds.classify(s).unwrap();
            prop_assert!((1..=10).contains(&decile));
            counts[decile as usize - 1] += 1;
        }
        let expected = scores.len() as f64 / 10.0;
        for (i, &count) in counts.iter().enumerate() {
            prop_assert!(
                (count as f64 - expected).abs() <= 1.0,
                "decile {} holds {} of {}", i + 1, count, scores.len()
            );
        }
    }
}

proptest! {
    #[test]
    fn decile_is_monotone_in_score(
        raw in prop::collection::vec(-1e6f64..1e6, 1..200),
        a in -2e6f64..2e6,
        b in -2e6f64..2e6,
    ) {
        let bounds = DecileBoundaries::from_scores(&raw).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(bounds.classify(lo) <= bounds.classify(hi));
    }
}

// =============================================================================
// Pseudonyms: equal inputs share an ID, distinct inputs never do.
// =============================================================================
proptest! {
    #[test]
    fn pseudonyms_are_injective(
        values in prop::collection::vec(prop::option::of("[a-e]{1,3}"), 0..80),
        seed in any::<u64>(),
        sequential in any::<bool>(),
    ) {
        let scheme = if sequential { IdScheme::Sequential } else { IdScheme::RandomDigits };
        let map = PseudonymMap::build(&values, scheme, 6, &mut seeded_rng(seed)).unwrap();

        let distinct: HashSet<&str> = values.iter().flatten().map(String::as_str).collect();
        prop_assert_eq!(map.len(), distinct.len());
        let ids: HashSet<String> = distinct.iter().map(|v| map.get(v).unwrap()).collect();
        prop_assert_eq!(ids.len(), distinct.len());
    }
}

// =============================================================================
// Windows and brackets partition their domains.
// =============================================================================
proptest! {
    #[test]
    fn every_hour_has_exactly_its_window(hour in 0u32..24) {
        let label = hour_range(hour).unwrap();
        let matching: Vec<_> = HOUR_RANGE_LABELS.iter().filter(|l| **l == label).collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(HOUR_RANGE_LABELS[hour as usize / 4], label);
    }

    #[test]
    fn brackets_are_ordered_by_age(a in 0i64..200, b in 0i64..200) {
        let index = |age: i64| {
            let label = age_bracket(age).unwrap();
            AGE_BRACKETS.iter().position(|(_, l)| *l == label).unwrap()
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(index(lo) <= index(hi));
    }
}

// =============================================================================
// Sampling keeps an ordered subsequence of the input.
// =============================================================================
proptest! {
    #[test]
    fn sample_is_an_ordered_subsequence(
        rows in 0usize..300,
        fraction in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let table = Table::from_columns(vec![Column::new(
            "row",
            ColumnData::Integer((0..rows as i64).map(Some).collect()),
        )])
        .unwrap();
        let sampled = bernoulli_sample(table, fraction, &mut seeded_rng(seed));
        let kept = sampled.column("row").unwrap().to_integers().unwrap();
        prop_assert!(kept.len() <= rows);
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn full_fraction_keeps_everything(rows in 0usize..300, seed in any::<u64>()) {
        let table = Table::from_columns(vec![Column::new(
            "row",
            ColumnData::Integer((0..rows as i64).map(Some).collect()),
        )])
        .unwrap();
        let sampled = bernoulli_sample(table, 1.0, &mut seeded_rng(seed));
        prop_assert_eq!(sampled.row_count(), rows);
    }
}
