//! Bivariate normal integer pairs with a target correlation.
//!
//! Covariance is `Σ = D·R·D` with `D = diag(σ1, σ2)` and `R = [[1, ρ], [ρ, 1]]`.
//! Standard normal draws are mapped through the lower Cholesky factor of `Σ`
//! and shifted by the means, then truncated toward zero. Values below a floor
//! are raised to it rather than redrawn, which biases the left tail; the
//! number of raised values is reported with the sample.

use deid_core::config::PairConfig;
use deid_core::errors::SynthError;
use deid_core::table::{Column, ColumnData, Table};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, warn};

type Matrix2 = [[f64; 2]; 2];

/// Location, scale and lower bound of one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginalSpec {
    pub mean: f64,
    pub std_dev: f64,
    pub floor: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedPairSpec {
    pub rows: usize,
    pub rho: f64,
    pub first: MarginalSpec,
    pub second: MarginalSpec,
}

impl From<&PairConfig> for CorrelatedPairSpec {
    fn from(config: &PairConfig) -> Self {
        Self {
            rows: config.rows,
            rho: config.rho,
            first: MarginalSpec {
                mean: config.mean_first,
                std_dev: config.std_dev_first,
                floor: config.floor_first,
            },
            second: MarginalSpec {
                mean: config.mean_second,
                std_dev: config.std_dev_second,
                floor: config.floor_second,
            },
        }
    }
}

impl CorrelatedPairSpec {
    /// Reject parameters that cannot describe a proper bivariate normal.
    ///
    /// Non-finite values, negative deviations and `|ρ| > 1` are invalid
    /// parameters. A zero deviation or `|ρ| = 1` makes `Σ` singular and is
    /// reported as a degenerate distribution.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.rho.is_finite() {
            return Err(invalid("rho", "must be finite"));
        }
        if self.rho.abs() > 1.0 {
            return Err(invalid("rho", "must lie in [-1, 1]"));
        }
        for (label, marginal) in [("first", &self.first), ("second", &self.second)] {
            if !marginal.mean.is_finite() {
                return Err(invalid(&format!("mean_{label}"), "must be finite"));
            }
            if !marginal.std_dev.is_finite() || marginal.std_dev < 0.0 {
                return Err(invalid(
                    &format!("std_dev_{label}"),
                    "must be finite and non-negative",
                ));
            }
            if marginal.std_dev == 0.0 {
                return Err(SynthError::DegenerateDistribution {
                    reason: format!("std_dev_{label} is zero"),
                });
            }
        }
        if self.rho.abs() == 1.0 {
            return Err(SynthError::DegenerateDistribution {
                reason: "perfect correlation makes the covariance singular".to_string(),
            });
        }
        Ok(())
    }

    pub fn covariance(&self) -> Matrix2 {
        covariance_matrix(
            [self.first.std_dev, self.second.std_dev],
            &correlation_matrix(self.rho),
        )
    }
}

/// Generated columns plus how many values were raised to each floor.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedSample {
    pub first: Vec<i64>,
    pub second: Vec<i64>,
    pub clamped: [usize; 2],
}

impl CorrelatedSample {
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Two integer columns named `first` and `second`.
    pub fn to_table(&self, first: &str, second: &str) -> Result<Table, SynthError> {
        let column = |name: &str, values: &[i64]| {
            Column::new(name, ColumnData::Integer(values.iter().copied().map(Some).collect()))
        };
        Ok(Table::from_columns(vec![
            column(first, &self.first),
            column(second, &self.second),
        ])?)
    }
}

pub fn correlation_matrix(rho: f64) -> Matrix2 {
    [[1.0, rho], [rho, 1.0]]
}

/// `D·R·D` for `D = diag(std_dev)`.
pub fn covariance_matrix(std_dev: [f64; 2], correlation: &Matrix2) -> Matrix2 {
    let mut sigma = [[0.0; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            sigma[i][j] = std_dev[i] * correlation[i][j] * std_dev[j];
        }
    }
    sigma
}

/// Lower-triangular `L` with `L·Lᵀ = m`. Fails unless `m` is symmetric
/// positive definite.
pub fn cholesky_2x2(m: &Matrix2) -> Result<Matrix2, SynthError> {
    if m[0][1] != m[1][0] {
        return Err(invalid("covariance", "must be symmetric"));
    }
    if m[0][0] <= 0.0 {
        return Err(SynthError::DegenerateDistribution {
            reason: "covariance is not positive definite".to_string(),
        });
    }
    let l11 = m[0][0].sqrt();
    let l21 = m[1][0] / l11;
    let rest = m[1][1] - l21 * l21;
    if rest <= 0.0 {
        return Err(SynthError::DegenerateDistribution {
            reason: "covariance is not positive definite".to_string(),
        });
    }
    Ok([[l11, 0.0], [l21, rest.sqrt()]])
}

/// Draw `spec.rows` correlated integer pairs.
pub fn synthesize_pair<R: Rng + ?Sized>(
    spec: &CorrelatedPairSpec,
    rng: &mut R,
) -> Result<CorrelatedSample, SynthError> {
    spec.validate()?;
    let l = cholesky_2x2(&spec.covariance())?;

    let mut first = Vec::with_capacity(spec.rows);
    let mut second = Vec::with_capacity(spec.rows);
    let mut clamped = [0usize; 2];
    for _ in 0..spec.rows {
        let z1: f64 = StandardNormal.sample(rng);
        let z2: f64 = StandardNormal.sample(rng);
        let x1 = spec.first.mean + l[0][0] * z1;
        let x2 = spec.second.mean + l[1][0] * z1 + l[1][1] * z2;
        first.push(floor_at(x1, spec.first.floor, &mut clamped[0]));
        second.push(floor_at(x2, spec.second.floor, &mut clamped[1]));
    }

    debug!(rows = spec.rows, rho = spec.rho, "synthesized correlated pair");
    if clamped.iter().any(|&c| c > 0) {
        warn!(
            first = clamped[0],
            second = clamped[1],
            rows = spec.rows,
            "values raised to their floor"
        );
    }
    Ok(CorrelatedSample {
        first,
        second,
        clamped,
    })
}

fn floor_at(value: f64, floor: i64, clamped: &mut usize) -> i64 {
    let truncated = value.trunc() as i64;
    if truncated < floor {
        *clamped += 1;
        floor
    } else {
        truncated
    }
}

fn invalid(name: &str, reason: &str) -> SynthError {
    SynthError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_reproduces_the_covariance() {
        let sigma = covariance_matrix([15.0, 30.0], &correlation_matrix(0.95));
        let l = cholesky_2x2(&sigma).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let product: f64 = (0..2).map(|k| l[i][k] * l[j][k]).sum();
                assert!((product - sigma[i][j]).abs() < 1e-9);
            }
        }
        assert_eq!(l[0][1], 0.0);
    }

    #[test]
    fn covariance_is_drd() {
        let sigma = covariance_matrix([2.0, 3.0], &correlation_matrix(0.5));
        assert_eq!(sigma, [[4.0, 3.0], [3.0, 9.0]]);
    }

    #[test]
    fn truncation_goes_toward_zero_before_the_floor() {
        let mut clamped = 0;
        assert_eq!(floor_at(7.9, 0, &mut clamped), 7);
        assert_eq!(floor_at(-0.5, 0, &mut clamped), 0);
        assert_eq!(clamped, 0);
        assert_eq!(floor_at(-1.5, 0, &mut clamped), 0);
        assert_eq!(clamped, 1);
    }
}
