use std::path::Path;

use deid_core::table::Table;
use deid_core::DeidConfig;
use deid_synth::MockEventGenerator;

pub fn execute(
    config: &DeidConfig,
    reference: &Path,
    output: &Path,
    rows: Option<usize>,
    correlated: bool,
) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(rows) = rows {
        config.mock.rows = rows;
    }
    config.mock.correlate_age_duration |= correlated;

    let reference = Table::read_csv(reference)?;
    let table = MockEventGenerator::from_config(&config)
        .generate(&reference, &mut super::rng(config.pipeline.seed))?;
    table.write_csv(output)?;
    Ok(())
}
