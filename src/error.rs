//! Custom error types for Lana
//!
//! The finance, notification and config services report problems as
//! structured values rather than errors. `LanaError` covers the outer layers:
//! configuration files, ledger snapshots, exports and the auth API.

use thiserror::Error;

/// The main error type for Lana operations
#[derive(Error, Debug)]
pub enum LanaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Errors returned by the remote auth API
    #[error("API error: {0}")]
    Api(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LanaError {
    /// Create a "not found" error for settings keys
    pub fn setting_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Setting",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LanaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LanaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LanaError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Lana operations
pub type LanaResult<T> = Result<T, LanaError>;
