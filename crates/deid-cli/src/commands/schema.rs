use std::path::Path;

use anyhow::Context;
use deid_core::table::Table;
use deid_core::DeidConfig;

pub fn execute(
    config: &DeidConfig,
    input: &Path,
    output: Option<&Path>,
    threshold: Option<usize>,
) -> anyhow::Result<()> {
    let table = Table::read_csv(input)?;
    let schema = super::schema_for(config, &table, threshold)?;
    let json = serde_json::to_string_pretty(&schema)?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing schema to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
