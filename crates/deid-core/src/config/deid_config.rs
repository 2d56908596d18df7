//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ColumnsConfig, JoinMissPolicy, MockConfig, ObservabilityConfig, PipelineConfig,
    ReferenceConfig, SampleConfig, StageKind, SynthConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (`CliOverrides`)
/// 2. Environment variables (`DEID_*`)
/// 3. TOML config file
/// 4. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeidConfig {
    pub columns: ColumnsConfig,
    pub reference: ReferenceConfig,
    pub pipeline: PipelineConfig,
    pub synth: SynthConfig,
    pub mock: MockConfig,
    pub observability: ObservabilityConfig,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub join_miss: Option<JoinMissPolicy>,
    pub sample_fraction: Option<f64>,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl DeidConfig {
    /// Resolve the configuration from an optional file, the environment and
    /// CLI overrides, then validate it.
    pub fn load(file: Option<&Path>, cli: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(sample) = &self.pipeline.sample {
            if !(sample.fraction > 0.0 && sample.fraction <= 1.0) {
                return Err(invalid("pipeline.sample.fraction", "must be in (0, 1]"));
            }
            if sample.after < StageKind::GeneralizeLocation {
                return Err(invalid(
                    "pipeline.sample.after",
                    "sampling must run after generalize_location",
                ));
            }
        }
        if !(1..=18).contains(&self.pipeline.pseudonym.digits) {
            return Err(invalid("pipeline.pseudonym.digits", "must be between 1 and 18"));
        }
        if self.pipeline.allowed_genders.is_empty() {
            return Err(invalid("pipeline.allowed_genders", "must not be empty"));
        }

        let mock = &self.mock;
        if mock.gender_codes.len() != mock.gender_weights.len() {
            return Err(invalid("mock.gender_weights", "one weight per gender code"));
        }
        if mock.age_bracket_starts.len() != mock.age_bracket_weights.len() {
            return Err(invalid("mock.age_bracket_weights", "one weight per age bracket"));
        }
        for (field, weights) in [
            ("mock.gender_weights", &mock.gender_weights),
            ("mock.age_bracket_weights", &mock.age_bracket_weights),
        ] {
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
                return Err(invalid(field, "weights must be non-negative with a positive sum"));
            }
        }
        if mock.duration_min > mock.duration_max {
            return Err(invalid("mock.duration_min", "must not exceed mock.duration_max"));
        }
        if mock.duration_std_dev <= 0.0 {
            return Err(invalid("mock.duration_std_dev", "must be greater than 0"));
        }
        Ok(())
    }

    /// Pattern: `DEID_SEED`, `DEID_JOIN_MISS`, `DEID_SAMPLE_FRACTION`, `DEID_LOG_LEVEL`.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("DEID_SEED") {
            let seed = val
                .parse::<u64>()
                .map_err(|_| invalid("DEID_SEED", "must be an unsigned integer"))?;
            self.pipeline.seed = Some(seed);
        }
        if let Ok(val) = std::env::var("DEID_JOIN_MISS") {
            self.pipeline.join_miss = JoinMissPolicy::from_name(&val)
                .ok_or_else(|| invalid("DEID_JOIN_MISS", "expected drop, fail or impute"))?;
        }
        if let Ok(val) = std::env::var("DEID_SAMPLE_FRACTION") {
            let fraction = val
                .parse::<f64>()
                .map_err(|_| invalid("DEID_SAMPLE_FRACTION", "must be a number"))?;
            self.set_sample_fraction(fraction);
        }
        if let Ok(val) = std::env::var("DEID_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        Ok(())
    }

    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(seed) = cli.seed {
            self.pipeline.seed = Some(seed);
        }
        if let Some(policy) = cli.join_miss {
            self.pipeline.join_miss = policy;
        }
        if let Some(fraction) = cli.sample_fraction {
            self.set_sample_fraction(fraction);
        }
        if let Some(ref level) = cli.log_level {
            self.observability.log_level = level.clone();
        }
        if let Some(json) = cli.json_logs {
            self.observability.json = json;
        }
    }

    fn set_sample_fraction(&mut self, fraction: f64) {
        let sample = self.pipeline.sample.get_or_insert_with(SampleConfig::default);
        sample.fraction = fraction;
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
