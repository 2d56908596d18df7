use serde::{Deserialize, Serialize};

use super::defaults::{self, strings};

/// Parameters of one correlated integer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    pub rows: usize,
    pub rho: f64,
    pub mean_first: f64,
    pub std_dev_first: f64,
    pub floor_first: i64,
    pub mean_second: f64,
    pub std_dev_second: f64,
    pub floor_second: i64,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            rows: defaults::DEFAULT_PAIR_ROWS,
            rho: defaults::DEFAULT_PAIR_RHO,
            mean_first: defaults::DEFAULT_PAIR_MEAN_FIRST,
            std_dev_first: defaults::DEFAULT_PAIR_STD_DEV_FIRST,
            floor_first: defaults::DEFAULT_PAIR_FLOOR_FIRST,
            mean_second: defaults::DEFAULT_PAIR_MEAN_SECOND,
            std_dev_second: defaults::DEFAULT_PAIR_STD_DEV_SECOND,
            floor_second: defaults::DEFAULT_PAIR_FLOOR_SECOND,
        }
    }
}

/// Synthesis settings: the correlated pair and the external-engine schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub pair: PairConfig,
    /// Columns with at most this many distinct values are categorical.
    /// `None` uses the distinct count of the treatment column.
    pub category_threshold: Option<usize>,
    /// Differential-privacy noise budget handed to the engine.
    pub epsilon: Option<f64>,
    /// Maximum parents per node in the engine's dependency model.
    pub max_parents: Option<usize>,
}

/// Mock raw-dataset generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub rows: usize,
    /// Arrival window start, `YYYY-MM-DD HH:MM:SS`.
    pub start: String,
    /// Arrival window end, `YYYY-MM-DD HH:MM:SS`.
    pub end: String,
    pub hospitals: Vec<String>,
    pub treatments: Vec<String>,
    pub gender_codes: Vec<String>,
    pub gender_weights: Vec<f64>,
    pub age_bracket_starts: Vec<i64>,
    pub age_bracket_weights: Vec<f64>,
    pub duration_mean: f64,
    pub duration_std_dev: f64,
    pub duration_min: f64,
    pub duration_max: f64,
    /// Only reference postcodes whose in-use flag equals this are sampled.
    pub postcode_in_use: String,
    /// Draw age and duration jointly from `synth.pair` instead of independently.
    pub correlate_age_duration: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            rows: defaults::DEFAULT_MOCK_ROWS,
            start: defaults::DEFAULT_MOCK_START.to_string(),
            end: defaults::DEFAULT_MOCK_END.to_string(),
            hospitals: strings(defaults::DEFAULT_MOCK_HOSPITALS),
            treatments: strings(defaults::DEFAULT_MOCK_TREATMENTS),
            gender_codes: strings(defaults::DEFAULT_MOCK_GENDER_CODES),
            gender_weights: defaults::DEFAULT_MOCK_GENDER_WEIGHTS.to_vec(),
            age_bracket_starts: defaults::DEFAULT_MOCK_AGE_BRACKET_STARTS.to_vec(),
            age_bracket_weights: defaults::DEFAULT_MOCK_AGE_BRACKET_WEIGHTS.to_vec(),
            duration_mean: defaults::DEFAULT_MOCK_DURATION_MEAN,
            duration_std_dev: defaults::DEFAULT_MOCK_DURATION_STD_DEV,
            duration_min: defaults::DEFAULT_MOCK_DURATION_MIN,
            duration_max: defaults::DEFAULT_MOCK_DURATION_MAX,
            postcode_in_use: defaults::DEFAULT_MOCK_POSTCODE_IN_USE.to_string(),
            correlate_age_duration: defaults::DEFAULT_MOCK_CORRELATE_AGE_DURATION,
        }
    }
}
