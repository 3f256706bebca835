//! Custom error types for funding-recon
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Per-child problems (bad dates, unparseable descriptions, missing expiry)
//! are not errors: they degrade that child only and are reported in the
//! reconciliation output. Only table-level failures surface here.

use thiserror::Error;

/// The main error type for funding-recon operations
#[derive(Error, Debug)]
pub enum FundingError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required column could not be located in an input table
    #[error("{table} table has no column matching '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Interactive resolution errors
    #[error("Resolution error: {0}")]
    Resolution(String),
}

impl FundingError {
    /// Create a "missing column" error
    pub fn missing_column(table: &'static str, column: &'static str) -> Self {
        Self::MissingColumn { table, column }
    }

    /// Check if this is a missing column error
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

impl From<std::io::Error> for FundingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for FundingError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for FundingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for funding-recon operations
pub type FundingResult<T> = Result<T, FundingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FundingError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_column_error() {
        let err = FundingError::missing_column("Funding", "Description");
        assert_eq!(
            err.to_string(),
            "Funding table has no column matching 'Description'"
        );
        assert!(err.is_missing_column());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FundingError = io_err.into();
        assert!(matches!(err, FundingError::Io(_)));
    }
}
