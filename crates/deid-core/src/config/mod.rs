//! Configuration system for deid.
//! TOML-based, layered: CLI > env > file > defaults.

pub mod columns_config;
pub mod deid_config;
pub mod defaults;
pub mod observability_config;
pub mod pipeline_config;
pub mod synth_config;

pub use columns_config::{ColumnsConfig, ReferenceConfig};
pub use deid_config::{CliOverrides, DeidConfig};
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::{
    IdScheme, JoinMissPolicy, PipelineConfig, PseudonymConfig, SampleConfig, StageKind,
};
pub use synth_config::{MockConfig, PairConfig, SynthConfig};
