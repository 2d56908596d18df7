//! Sample statistics of a generated pair, via `statrs`.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::correlated::CorrelatedSample;

/// Sample moments of both attributes and their Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairSummary {
    pub rows: usize,
    pub mean: [f64; 2],
    pub std_dev: [f64; 2],
    pub pearson: f64,
    pub clamped: [usize; 2],
}

/// Pearson correlation of two equally long samples. NaN with fewer than two
/// points or zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    let covariance = a.iter().covariance(b.iter());
    let denominator = a.iter().std_dev() * b.iter().std_dev();
    if denominator == 0.0 {
        return f64::NAN;
    }
    covariance / denominator
}

pub fn summarize(sample: &CorrelatedSample) -> PairSummary {
    let first: Vec<f64> = sample.first.iter().map(|&v| v as f64).collect();
    let second: Vec<f64> = sample.second.iter().map(|&v| v as f64).collect();
    PairSummary {
        rows: sample.len(),
        mean: [first.iter().mean(), second.iter().mean()],
        std_dev: [first.iter().std_dev(), second.iter().std_dev()],
        pearson: pearson(&first, &second),
        clamped: sample.clamped,
    }
}
