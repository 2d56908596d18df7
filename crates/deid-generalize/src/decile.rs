//! Equal-frequency binning over a reference score distribution.
//!
//! Cut points are rank-based quantiles with linear interpolation between
//! neighbouring order statistics: the `b`-th cut sits at sorted position
//! `b * (n - 1) / 10`. Bins are closed on the right, `(cut[b-1], cut[b]]`,
//! and the first bin also includes the minimum.

use deid_core::constants::DECILE_COUNT;

const CUTS: usize = DECILE_COUNT - 1;

/// Nine cut points plus the observed range of the reference population.
#[derive(Debug, Clone, PartialEq)]
pub struct DecileBoundaries {
    min: f64,
    max: f64,
    cuts: [f64; CUTS],
}

impl DecileBoundaries {
    /// Compute boundaries from the reference scores. Non-finite values are
    /// ignored; `None` when nothing finite remains.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let mut cuts = [0.0; CUTS];
        for (i, cut) in cuts.iter_mut().enumerate() {
            *cut = rank_quantile(&sorted, i + 1);
        }
        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            cuts,
        })
    }

    pub fn cut_points(&self) -> &[f64; CUTS] {
        &self.cuts
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Decile `1..=10` of a score. A score equal to a cut point belongs to the
    /// lower decile. Scores outside the reference range fall into the first or
    /// last decile. NaN has no decile.
    pub fn classify(&self, score: f64) -> Option<u8> {
        if score.is_nan() {
            return None;
        }
        let bin = self
            .cuts
            .iter()
            .position(|&cut| score <= cut)
            .unwrap_or(CUTS);
        Some(bin as u8 + 1)
    }

    /// Classify a nullable score column.
    pub fn classify_all(&self, scores: &[Option<f64>]) -> Vec<Option<i64>> {
        scores
            .iter()
            .map(|s| s.and_then(|s| self.classify(s)).map(i64::from))
            .collect()
    }
}

/// Value at sorted position `bin * (n - 1) / DECILE_COUNT`, interpolated.
/// The position numerator is kept integral so exact ranks stay exact.
fn rank_quantile(sorted: &[f64], bin: usize) -> f64 {
    let numerator = bin * (sorted.len() - 1);
    let lower = numerator / DECILE_COUNT;
    let remainder = numerator % DECILE_COUNT;
    if remainder == 0 {
        return sorted[lower];
    }
    let fraction = remainder as f64 / DECILE_COUNT as f64;
    sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
}
