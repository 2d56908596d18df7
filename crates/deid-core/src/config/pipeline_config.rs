use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults::{self, strings};

/// The pipeline stages, in their fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    DropIdentifiers,
    GeneralizeLocation,
    AttachDecile,
    PseudonymizeFacility,
    GeneralizeArrival,
    FilterGender,
    BracketAge,
}

impl StageKind {
    pub const ORDER: [StageKind; 7] = [
        StageKind::DropIdentifiers,
        StageKind::GeneralizeLocation,
        StageKind::AttachDecile,
        StageKind::PseudonymizeFacility,
        StageKind::GeneralizeArrival,
        StageKind::FilterGender,
        StageKind::BracketAge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DropIdentifiers => "drop_identifiers",
            Self::GeneralizeLocation => "generalize_location",
            Self::AttachDecile => "attach_decile",
            Self::PseudonymizeFacility => "pseudonymize_facility",
            Self::GeneralizeArrival => "generalize_arrival",
            Self::FilterGender => "filter_gender",
            Self::BracketAge => "bracket_age",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a raw row whose location key is absent from the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMissPolicy {
    /// Drop the row and count it.
    #[default]
    Drop,
    /// Abort the run on the first miss.
    Fail,
    /// Keep the row with the impute label and a null decile.
    Impute,
}

impl JoinMissPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "drop" => Some(Self::Drop),
            "fail" => Some(Self::Fail),
            "impute" => Some(Self::Impute),
            _ => None,
        }
    }
}

/// How pseudonymous IDs are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// `1..=n` over the shuffled values.
    Sequential,
    /// Fixed-length random digit strings, unique within the run.
    #[default]
    RandomDigits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudonymConfig {
    pub scheme: IdScheme,
    /// Length of `RandomDigits` IDs.
    pub digits: usize,
}

impl Default for PseudonymConfig {
    fn default() -> Self {
        Self {
            scheme: IdScheme::default(),
            digits: defaults::DEFAULT_PSEUDONYM_DIGITS,
        }
    }
}

/// Optional Bernoulli subsampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Probability of keeping each row, in (0, 1].
    pub fraction: f64,
    /// Stage after which sampling runs. Must not precede the reference join.
    pub after: StageKind,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            fraction: defaults::DEFAULT_SAMPLE_FRACTION,
            after: StageKind::GeneralizeLocation,
        }
    }
}

/// Pipeline behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for every random draw in the run. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub join_miss: JoinMissPolicy,
    pub impute_area_label: String,
    /// Treat a join that keeps no rows as a hard error.
    pub fail_on_empty_join: bool,
    pub allowed_genders: Vec<String>,
    pub pseudonym: PseudonymConfig,
    pub sample: Option<SampleConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            join_miss: JoinMissPolicy::default(),
            impute_area_label: defaults::DEFAULT_IMPUTE_AREA_LABEL.to_string(),
            fail_on_empty_join: defaults::DEFAULT_FAIL_ON_EMPTY_JOIN,
            allowed_genders: strings(defaults::DEFAULT_ALLOWED_GENDERS),
            pseudonym: PseudonymConfig::default(),
            sample: None,
        }
    }
}
