//! Error handling for deid.
//! One error enum per subsystem, `thiserror` only. The CLI is the sole `anyhow` user.

pub mod config_error;
pub mod error_code;
pub mod generalize_error;
pub mod pipeline_error;
pub mod synth_error;
pub mod table_error;

pub use config_error::ConfigError;
pub use error_code::DeidErrorCode;
pub use generalize_error::GeneralizeError;
pub use pipeline_error::PipelineError;
pub use synth_error::SynthError;
pub use table_error::TableError;
