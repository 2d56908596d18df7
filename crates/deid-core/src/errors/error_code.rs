//! Stable error codes shared by every error enum.

/// Maps an error onto a stable, machine-readable code.
///
/// The CLI prints `[CODE] message` on failure so wrapper scripts can branch
/// on the failure class without parsing prose.
pub trait DeidErrorCode {
    /// Returns the code string (e.g. `"MISSING_COLUMN"`).
    fn error_code(&self) -> &'static str;

    /// Returns `[CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const DUPLICATE_COLUMN: &str = "DUPLICATE_COLUMN";
pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
pub const PARSE_FAILURE: &str = "PARSE_FAILURE";
pub const OUT_OF_DOMAIN: &str = "OUT_OF_DOMAIN";
pub const JOIN_MISS: &str = "JOIN_MISS";
pub const EMPTY_JOIN: &str = "EMPTY_JOIN";
pub const INVALID_CATEGORY: &str = "INVALID_CATEGORY";
pub const ID_SPACE_EXHAUSTED: &str = "ID_SPACE_EXHAUSTED";
pub const DEGENERATE_DISTRIBUTION: &str = "DEGENERATE_DISTRIBUTION";
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const ENGINE_ERROR: &str = "ENGINE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CANCELLED: &str = "CANCELLED";
