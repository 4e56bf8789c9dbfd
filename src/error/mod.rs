//! Error handling for the risk pipeline and its table I/O.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Specialized error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error in an Arrow compute kernel or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting between typed rows and Arrow arrays
    #[error("Arrow serialization error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the input table
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column exists but cannot be read as the expected type
    #[error("Column '{column}' is not a {expected} array")]
    ColumnType { column: String, expected: String },

    /// A row violates the event record contract
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// A typed record was built from invalid values
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A configuration value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a malformed record error
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
