use std::path::Path;

use anyhow::Context;
use deid_core::table::Table;
use deid_core::DeidConfig;
use deid_synth::{compare_marginals, synthesize_with, IndependentEngine};
use tracing::info;

pub fn execute(
    config: &DeidConfig,
    input: &Path,
    output: &Path,
    rows: Option<usize>,
    description_path: Option<&Path>,
    threshold: Option<usize>,
) -> anyhow::Result<()> {
    let source = Table::read_csv(input)?;
    let schema = super::schema_for(config, &source, threshold)?;
    let rows = rows.unwrap_or(source.row_count());

    let engine = IndependentEngine::new(config.pipeline.seed);
    let synthetic = synthesize_with(&engine, &source, &schema, rows)?;
    synthetic.table.write_csv(output)?;

    if let Some(path) = description_path {
        let json = serde_json::to_string_pretty(&synthetic.description)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing description to {}", path.display()))?;
    }

    for marginal in compare_marginals(&source, &synthetic.table, &schema)? {
        info!(column = %marginal.column, distance = marginal.distance, "marginal drift");
    }
    Ok(())
}
