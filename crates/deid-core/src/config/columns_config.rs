use serde::{Deserialize, Serialize};

use super::defaults::{self, strings};

/// Column names of the raw event table and of the derived output columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Direct identifiers, dropped before anything else runs.
    pub identifiers: Vec<String>,
    pub postcode: String,
    pub facility: String,
    pub arrival_time: String,
    pub duration: String,
    pub treatment: String,
    pub gender: String,
    pub age: String,
    pub decile: String,
    pub facility_id: String,
    pub arrival_date: String,
    pub hour_range: String,
    pub age_bracket: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            identifiers: strings(defaults::DEFAULT_IDENTIFIER_COLUMNS),
            postcode: defaults::DEFAULT_POSTCODE_COLUMN.to_string(),
            facility: defaults::DEFAULT_FACILITY_COLUMN.to_string(),
            arrival_time: defaults::DEFAULT_ARRIVAL_TIME_COLUMN.to_string(),
            duration: defaults::DEFAULT_DURATION_COLUMN.to_string(),
            treatment: defaults::DEFAULT_TREATMENT_COLUMN.to_string(),
            gender: defaults::DEFAULT_GENDER_COLUMN.to_string(),
            age: defaults::DEFAULT_AGE_COLUMN.to_string(),
            decile: defaults::DEFAULT_DECILE_COLUMN.to_string(),
            facility_id: defaults::DEFAULT_FACILITY_ID_COLUMN.to_string(),
            arrival_date: defaults::DEFAULT_ARRIVAL_DATE_COLUMN.to_string(),
            hour_range: defaults::DEFAULT_HOUR_RANGE_COLUMN.to_string(),
            age_bracket: defaults::DEFAULT_AGE_BRACKET_COLUMN.to_string(),
        }
    }
}

/// Column names of the reference (postcode lookup) table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Join key, matched against the raw postcode column.
    pub key: String,
    /// Generalization value (area code).
    pub area: String,
    /// Numeric deprivation score the deciles are computed over.
    pub score: String,
    pub in_use: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            key: defaults::DEFAULT_REFERENCE_KEY_COLUMN.to_string(),
            area: defaults::DEFAULT_AREA_COLUMN.to_string(),
            score: defaults::DEFAULT_SCORE_COLUMN.to_string(),
            in_use: defaults::DEFAULT_REFERENCE_IN_USE_COLUMN.to_string(),
        }
    }
}
