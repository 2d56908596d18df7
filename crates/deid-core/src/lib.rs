//! # deid-core
//!
//! Foundation crate for the deid workspace: the table model every stage
//! transforms, per-subsystem errors, layered configuration, cooperative
//! cancellation and tracing setup.

pub mod config;
pub mod constants;
pub mod errors;
pub mod table;
pub mod tracing;
pub mod traits;

pub use config::DeidConfig;
pub use errors::{
    ConfigError, DeidErrorCode, GeneralizeError, PipelineError, SynthError, TableError,
};
pub use table::{Column, ColumnData, ColumnType, JoinOutcome, Table};
pub use traits::{CancellationToken, Cancellable};
