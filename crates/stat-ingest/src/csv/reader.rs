//! CSV file reading with explicit header row configuration.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, NullValues, SerReader};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, normalize_header, parse_csv_line};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Cell contents read as missing, in addition to empty cells.
pub const NULL_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "#N/A"];

/// Column count above which a wide-dataset warning is logged.
const WIDE_DATASET_COLUMNS: usize = 500;

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against [`MAX_CSV_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; a UTF-8 BOM is accepted and stripped later.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_file(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| io_error(path, e))?;
    if bytes_read < 2 {
        return Ok(());
    }
    let encoding = match buffer {
        [0xFF, 0xFE] => "UTF-16 LE",
        [0xFE, 0xFF] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// Validate DataFrame shape after loading.
///
/// Rejects tables without rows or with blank column names and warns about
/// very wide tables.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }
    if df.width() > WIDE_DATASET_COLUMNS {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "dataset has more than {WIDE_DATASET_COLUMNS} columns"
        );
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_first_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    let reader = BufReader::new(open_file(path)?);
    let mut lines = Vec::with_capacity(n);
    for line in reader.lines().take(n) {
        let line = line.map_err(|e| io_error(path, e))?;
        lines.push(line.trim_start_matches('\u{feff}').to_string());
    }
    Ok(lines)
}

/// Reads the header row(s) of a CSV file.
///
/// - `header_rows = 1`: column names only
/// - `header_rows = 2`: a row of descriptive labels, then the column names
pub fn read_csv_schema(path: &Path, header_rows: usize) -> Result<CsvHeaders> {
    let lines = read_first_lines(path, header_rows.clamp(1, 2))?;
    if lines.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let headers = if header_rows >= 2 && lines.len() >= 2 {
        CsvHeaders::with_labels(parse_csv_line(&lines[0]), parse_csv_line(&lines[1]))
    } else {
        CsvHeaders::single(parse_csv_line(&lines[0]))
    };
    if headers.columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if let Some(column) = headers.first_duplicate() {
        return Err(IngestError::DuplicateColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

/// Reads a CSV file into a Polars DataFrame.
///
/// Column types are inferred by polars over the whole file: integer and
/// float columns become numeric, everything else stays a string column.
/// Empty cells and [`NULL_MARKERS`] are null.
/// Column names are normalized the same way as [`read_csv_schema`].
pub fn read_csv_table(path: &Path, header_rows: usize) -> Result<(DataFrame, CsvHeaders)> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let headers = read_csv_schema(path, header_rows)?;

    let parse_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(headers.skip_rows - 1)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(
            NullValues::AllColumns(NULL_MARKERS.iter().map(|&marker| marker.into()).collect()),
        )))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    normalize_column_names(&mut df)?;
    validate_dataframe_shape(&df, path)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );
    Ok((df, headers))
}

fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .map(|name| (name.to_string(), normalize_header(name)))
        .filter(|(raw, normalized)| raw != normalized)
        .collect();
    for (raw, normalized) in renames {
        df.rename(&raw, normalized.into())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_schema_single_header() {
        let file = create_temp_csv(b"age,income,gender\n31,4200,F\n");
        let headers = read_csv_schema(file.path(), 1).unwrap();
        assert_eq!(headers.columns, vec!["age", "income", "gender"]);
        assert!(headers.labels.is_none());
    }

    #[test]
    fn test_read_csv_schema_with_labels() {
        let file = create_temp_csv(b"Age in years,Monthly income\nage,income\n31,4200\n");
        let headers = read_csv_schema(file.path(), 2).unwrap();
        assert_eq!(headers.columns, vec!["age", "income"]);
        assert_eq!(headers.label_for("income"), Some("Monthly income"));
        assert_eq!(headers.skip_rows, 2);
    }

    #[test]
    fn test_read_csv_schema_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_schema(file.path(), 1);
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_schema_duplicate_column() {
        let file = create_temp_csv(b"q1,q2,q1\n1,2,3\n");
        let result = read_csv_schema(file.path(), 1);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { column, .. }) if column == "q1"
        ));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'a', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 4),
            Err(IngestError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/survey.csv"), 1);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_header_only_is_empty() {
        let file = create_temp_csv(b"age,income\n");
        let result = read_csv_table(file.path(), 1);
        assert!(matches!(result, Err(IngestError::EmptyDataFrame { .. })));
    }
}
