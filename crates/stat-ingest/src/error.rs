//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or preparing a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size cap.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte-order mark for an encoding we cannot read.
    #[error("unsupported encoding {encoding} in {path} (save the file as UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header row repeats a column name.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    /// Parsed table has no data rows.
    #[error("no data rows in {path}")]
    EmptyDataFrame { path: PathBuf },

    /// A header cell is blank.
    #[error("blank column name in {path}")]
    EmptyColumnName { path: PathBuf },

    // === Composite Column Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A composite item is not a numeric column.
    #[error("column '{column}' is not numeric and cannot be summed")]
    NonNumericColumn { column: String },

    /// A composite was requested without any items.
    #[error("composite column '{name}' needs at least one item")]
    EmptyComposite { name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/survey.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/survey.csv");

        let err = IngestError::NonNumericColumn {
            column: "Gender".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'Gender' is not numeric and cannot be summed"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("score".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
