//! Stable machine-readable error codes.

/// Every error enum exposes a stable code string so callers on the far side of
/// a serialization boundary can branch without parsing messages.
pub trait ReadinessErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_VALIDATION_ERROR: &str = "GRAPH_VALIDATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
