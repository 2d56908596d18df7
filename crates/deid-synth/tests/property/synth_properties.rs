//! Property tests for deid-synth: floors, shape and parameter rejection.

use proptest::prelude::*;

use deid_core::errors::SynthError;
use deid_synth::{cholesky_2x2, correlation_matrix, covariance_matrix, synthesize_pair, CorrelatedPairSpec, MarginalSpec};
use test_fixtures::seeded_rng;

fn marginal() -> impl Strategy<Value = MarginalSpec> {
    (-100.0f64..200.0, 0.1f64..80.0, -20i64..50).prop_map(|(mean, std_dev, floor)| MarginalSpec {
        mean,
        std_dev,
        floor,
    })
}

// =============================================================================
// Valid parameters: right length, nothing below either floor.
// =============================================================================
proptest! {
    #[test]
    fn samples_respect_floors_and_length(
        rows in 0usize..400,
        rho in -0.99f64..0.99,
        first in marginal(),
        second in marginal(),
        seed in any::<u64>(),
    ) {
        let spec = CorrelatedPairSpec { rows, rho, first, second };
        let sample = synthesize_pair(&spec, &mut seeded_rng(seed)).unwrap();
        prop_assert_eq!(sample.first.len(), rows);
        prop_assert_eq!(sample.second.len(), rows);
        prop_assert!(sample.first.iter().all(|&v| v >= first.floor));
        prop_assert!(sample.second.iter().all(|&v| v >= second.floor));
        prop_assert!(sample.clamped[0] <= rows && sample.clamped[1] <= rows);
    }
}

// =============================================================================
// The Cholesky factor reproduces D·R·D for every non-singular pair.
// =============================================================================
proptest! {
    #[test]
    fn cholesky_factor_reproduces_covariance(
        rho in -0.99f64..0.99,
        s1 in 0.01f64..100.0,
        s2 in 0.01f64..100.0,
    ) {
        let sigma = covariance_matrix([s1, s2], &correlation_matrix(rho));
        let l = cholesky_2x2(&sigma).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let product: f64 = (0..2).map(|k| l[i][k] * l[j][k]).sum();
                prop_assert!((product - sigma[i][j]).abs() <= 1e-9 * sigma[i][j].abs().max(1.0));
            }
        }
    }
}

// =============================================================================
// |ρ| > 1 is always rejected, never sampled.
// =============================================================================
proptest! {
    #[test]
    fn correlation_beyond_one_is_invalid(
        magnitude in 1.0001f64..10.0,
        negative in any::<bool>(),
        first in marginal(),
        second in marginal(),
    ) {
        let rho = if negative { -magnitude } else { magnitude };
        let spec = CorrelatedPairSpec { rows: 5, rho, first, second };
        let err = synthesize_pair(&spec, &mut seeded_rng(0)).unwrap_err();
        let is_invalid = matches!(err, SynthError::InvalidParameter { .. });
        prop_assert!(is_invalid);
    }
}
