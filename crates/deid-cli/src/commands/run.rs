use std::path::Path;

use anyhow::Context;
use deid_core::table::Table;
use deid_core::traits::CancellationToken;
use deid_core::DeidConfig;
use deid_pipeline::{Pipeline, RowIssue};
use tracing::info;

pub fn execute(
    config: &DeidConfig,
    input: &Path,
    reference: &Path,
    output: &Path,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    let reference_table = Table::read_csv(reference)?;
    let pipeline = Pipeline::from_reference_table(config, &reference_table)?;

    let raw = Table::read_csv(input)?;
    let (table, report) = pipeline.run(raw, &CancellationToken::new())?;
    table.write_csv(output)?;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing run report to {}", path.display()))?;
    }

    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        join_misses = report.issue_count(RowIssue::JoinMiss),
        invalid_categories = report.issue_count(RowIssue::InvalidCategory),
        output = %output.display(),
        "de-identified table written"
    );
    Ok(())
}
