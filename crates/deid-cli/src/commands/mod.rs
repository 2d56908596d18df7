pub mod mock;
pub mod run;
pub mod schema;
pub mod synth_pair;
pub mod synthesize;

use deid_core::config::SynthConfig;
use deid_core::table::Table;
use deid_core::DeidConfig;
use deid_synth::SynthSchema;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The configured seed, or entropy.
fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Schema for `table`, with `threshold` taking precedence over the config.
fn schema_for(
    config: &DeidConfig,
    table: &Table,
    threshold: Option<usize>,
) -> Result<SynthSchema, deid_core::SynthError> {
    let synth = SynthConfig {
        category_threshold: threshold.or(config.synth.category_threshold),
        ..config.synth.clone()
    };
    SynthSchema::from_config(table, &synth, &config.columns.treatment)
}
