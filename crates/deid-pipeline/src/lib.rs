//! # deid-pipeline
//!
//! Runs the de-identification stages in their fixed order over a raw event
//! table: identifiers out, location generalized through the reference, decile
//! attached, facility pseudonymized, arrival time windowed, gender filtered,
//! age bracketed. An optional sampling stage can follow any stage from the
//! reference join onward.

pub mod orchestrator;
pub mod report;
pub mod stage;
pub mod stages;

pub use orchestrator::Pipeline;
pub use report::{RowIssue, RunReport, StageReport};
pub use stage::{Stage, StageContext};
