//! Error types for the ledgerscope library.
//!
//! Only fatal conditions live here. Soft problems found during analysis
//! (short Benford samples, mixed-type columns) are recorded inside
//! [`AnalysisResult`](crate::AnalysisResult) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ledgerscope operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table has no columns, so there is nothing to profile.
    #[error("Empty table: no columns to analyze")]
    EmptyTable,

    /// Empty file or no header to build a table from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column's length disagrees with the rest of the table.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for ledgerscope operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
