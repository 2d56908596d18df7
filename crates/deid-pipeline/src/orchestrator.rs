//! Sequences the stages over one raw table.

use std::sync::Arc;
use std::time::Instant;

use deid_core::config::DeidConfig;
use deid_core::errors::PipelineError;
use deid_core::table::Table;
use deid_core::traits::Cancellable;
use deid_generalize::ReferenceData;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, info_span};

use crate::report::{RunReport, StageReport};
use crate::stage::{Stage, StageContext};
use crate::stages;

/// A configured run: the ordered stages plus the shared reference artifacts.
///
/// Built once, it can process any number of tables; each call to
/// [`Pipeline::run`] gets a fresh random source and fresh pseudonyms.
pub struct Pipeline {
    reference: Arc<ReferenceData>,
    stages: Vec<Box<dyn Stage>>,
    seed: Option<u64>,
}

impl Pipeline {
    /// Validate `config` and lay out its stages.
    pub fn new(config: &DeidConfig, reference: Arc<ReferenceData>) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            reference,
            stages: stages::build_stages(config),
            seed: config.pipeline.seed,
        })
    }

    /// Build the reference artifacts from a reference table, then the pipeline.
    pub fn from_reference_table(config: &DeidConfig, reference: &Table) -> Result<Self, PipelineError> {
        let data = ReferenceData::build(reference, &config.reference)?;
        Self::new(config, Arc::new(data))
    }

    pub fn reference(&self) -> &Arc<ReferenceData> {
        &self.reference
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run with the configured seed, or one drawn from entropy.
    pub fn run(&self, table: Table, cancel: &dyn Cancellable) -> Result<(Table, RunReport), PipelineError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        self.run_seeded(table, seed, cancel)
    }

    /// Run every stage in order. The first failure aborts the run and nothing
    /// of the partially transformed table is returned.
    pub fn run_seeded(
        &self,
        table: Table,
        seed: u64,
        cancel: &dyn Cancellable,
    ) -> Result<(Table, RunReport), PipelineError> {
        let required: Vec<&str> = self.stages.iter().flat_map(|s| s.required_columns()).collect();
        table.require(&required)?;

        let rows_in = table.row_count();
        info!(rows = rows_in, seed, stages = self.stages.len(), "pipeline run starting");

        let mut ctx = StageContext::new(&self.reference, StdRng::seed_from_u64(seed));
        let mut reports = Vec::with_capacity(self.stages.len());
        let mut table = table;
        for stage in &self.stages {
            cancel.checkpoint(stage.name())?;

            let span = info_span!("stage", name = stage.name());
            let _entered = span.enter();
            let started = Instant::now();
            let before = table.row_count();

            table = stage.apply(table, &mut ctx).map_err(|e| {
                error!(error = %e, "stage failed");
                PipelineError::in_stage(stage.name(), e)
            })?;

            let report = StageReport {
                name: stage.name().to_string(),
                rows_in: before,
                rows_out: table.row_count(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            info!(
                rows_in = report.rows_in,
                rows_out = report.rows_out,
                elapsed_ms = report.elapsed_ms,
                "stage complete"
            );
            reports.push(report);
        }

        let (issues, pseudonyms_issued) = ctx.into_tallies();
        let report = RunReport {
            seed,
            rows_in,
            rows_out: table.row_count(),
            stages: reports,
            issues,
            pseudonyms_issued,
        };
        info!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            dropped = report.rows_dropped(),
            "pipeline run complete"
        );
        Ok((table, report))
    }
}
