use std::path::Path;

use anyhow::bail;
use deid_core::DeidConfig;
use deid_synth::{summarize, synthesize_pair, CorrelatedPairSpec};
use tracing::info;

pub fn execute(
    config: &DeidConfig,
    output: &Path,
    rows: Option<usize>,
    rho: Option<f64>,
    names: &[String],
) -> anyhow::Result<()> {
    let [first, second] = names else {
        bail!("--names takes exactly two column names");
    };
    let mut spec = CorrelatedPairSpec::from(&config.synth.pair);
    if let Some(rows) = rows {
        spec.rows = rows;
    }
    if let Some(rho) = rho {
        spec.rho = rho;
    }

    let sample = synthesize_pair(&spec, &mut super::rng(config.pipeline.seed))?;
    sample.to_table(first, second)?.write_csv(output)?;

    let summary = summarize(&sample);
    info!(
        rows = summary.rows,
        pearson = summary.pearson,
        clamped_first = summary.clamped[0],
        clamped_second = summary.clamped[1],
        "correlated pair written"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
