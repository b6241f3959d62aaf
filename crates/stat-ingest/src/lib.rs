//! Dataset ingestion utilities.
//!
//! This crate loads tabular source data (CSV files) into Polars DataFrames
//! and prepares them for analysis.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files with one or two header rows
//! - **Input Checks**: File size cap, UTF-16 rejection, shape validation
//! - **Column Inventory**: Column names, types and completeness
//! - **Composite Columns**: Row-wise sums of selected numeric items
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use stat_ingest::{X_COMPOSITE, add_composite_column, read_csv_table};
//!
//! let (mut df, _headers) = read_csv_table(Path::new("survey.csv"), 1)?;
//! add_composite_column(&mut df, X_COMPOSITE, &["q1".into(), "q2".into()])?;
//! ```

mod columns;
mod csv;
mod error;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, NULL_MARKERS, check_file_size,
    check_file_size_with_limit, read_csv_schema, read_csv_table, validate_dataframe_shape,
    validate_encoding,
};

// === Columns ===
pub use columns::{
    ColumnInfo, X_COMPOSITE, Y_COMPOSITE, add_composite_column, list_columns, numeric_columns,
};

// === Values ===
pub use values::{any_to_category, any_to_f64, format_numeric, is_missing, is_numeric_dtype};
