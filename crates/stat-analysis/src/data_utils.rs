//! DataFrame value extraction for analysis.
//!
//! Column kind comes from the declared dtype only. A cell is missing when it
//! is null or, in a float column, NaN.

use polars::prelude::{Column, DataFrame};
pub use stat_ingest::is_missing;
use stat_ingest::{any_to_category, any_to_f64, is_numeric_dtype};
use stat_model::ColumnKind;

use crate::error::{AnalysisError, Result};

fn lookup<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| AnalysisError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Numeric or categorical, by declared dtype.
pub fn column_kind(df: &DataFrame, name: &str) -> Result<ColumnKind> {
    let column = lookup(df, name)?;
    Ok(if is_numeric_dtype(column.dtype()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    })
}

/// Row indices where both `x` and `y` hold a value.
pub fn complete_rows(df: &DataFrame, x: &str, y: &str) -> Result<Vec<usize>> {
    let x_column = lookup(df, x)?;
    let y_column = lookup(df, y)?;
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if !is_missing(&x_column.get(idx)?) && !is_missing(&y_column.get(idx)?) {
            rows.push(idx);
        }
    }
    Ok(rows)
}

/// Numeric values of `name` at the given rows; missing cells are skipped.
pub fn numeric_at(df: &DataFrame, name: &str, rows: &[usize]) -> Result<Vec<f64>> {
    let column = lookup(df, name)?;
    let mut values = Vec::with_capacity(rows.len());
    for &idx in rows {
        if let Some(value) = any_to_f64(column.get(idx)?) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Category labels of `name` at the given rows; missing cells are skipped.
pub fn categories_at(df: &DataFrame, name: &str, rows: &[usize]) -> Result<Vec<String>> {
    let column = lookup(df, name)?;
    let mut values = Vec::with_capacity(rows.len());
    for &idx in rows {
        let value = column.get(idx)?;
        if is_missing(&value) {
            continue;
        }
        if let Some(label) = any_to_category(value) {
            values.push(label);
        }
    }
    Ok(values)
}

/// Every non-missing numeric value of a column, in row order.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let rows: Vec<usize> = (0..df.height()).collect();
    numeric_at(df, name, &rows)
}

/// Every non-missing category label of a column, in row order.
pub fn category_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let rows: Vec<usize> = (0..df.height()).collect();
    categories_at(df, name, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("age".into(), &[Some(30.0f64), None, Some(f64::NAN), Some(41.0)])
                .into_column(),
            Series::new("group".into(), &[Some("a"), Some("b"), Some("a"), None]).into_column(),
            Series::new("flag".into(), &[true, false, true, true]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_kind() {
        let df = frame();
        assert_eq!(column_kind(&df, "age").unwrap(), ColumnKind::Numeric);
        assert_eq!(column_kind(&df, "group").unwrap(), ColumnKind::Categorical);
        assert_eq!(column_kind(&df, "flag").unwrap(), ColumnKind::Categorical);
        assert!(matches!(
            column_kind(&df, "income"),
            Err(AnalysisError::ColumnNotFound { column }) if column == "income"
        ));
    }

    #[test]
    fn test_complete_rows_treats_nan_as_missing() {
        let df = frame();
        assert_eq!(complete_rows(&df, "age", "group").unwrap(), vec![0]);
        assert_eq!(complete_rows(&df, "group", "flag").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_value_extraction() {
        let df = frame();
        assert_eq!(numeric_values(&df, "age").unwrap(), vec![30.0, 41.0]);
        assert_eq!(category_values(&df, "group").unwrap(), vec!["a", "b", "a"]);
        assert_eq!(
            categories_at(&df, "flag", &[0, 1]).unwrap(),
            vec!["True", "False"]
        );
    }
}
