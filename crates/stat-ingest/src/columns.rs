//! Column inventory and composite (summed) columns.

use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};
use serde::Serialize;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::values::{any_to_f64, is_missing, is_numeric_dtype};

/// Default name of the composite built for the X variable.
pub const X_COMPOSITE: &str = "X_Total";
/// Default name of the composite built for the Y variable.
pub const Y_COMPOSITE: &str = "Y_Total";

/// Name, type and completeness of one dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub is_numeric: bool,
    pub non_missing: usize,
}

/// Lists the dataset's columns in order.
pub fn list_columns(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|column| ColumnInfo {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            is_numeric: is_numeric_dtype(column.dtype()),
            non_missing: count_present(column),
        })
        .collect()
}

/// Cells that are neither null nor, in float columns, NaN.
fn count_present(column: &Column) -> usize {
    if !column.dtype().is_float() {
        return column.len() - column.null_count();
    }
    (0..column.len())
        .filter(|&idx| !is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
        .count()
}

/// Names of the numeric columns, in dataset order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    list_columns(df)
        .into_iter()
        .filter(|info| info.is_numeric)
        .map(|info| info.name)
        .collect()
}

/// Adds (or replaces) `name` as the row-wise sum of the numeric `items`.
///
/// Missing cells contribute 0, so a row with every item missing sums to 0.
pub fn add_composite_column(df: &mut DataFrame, name: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(IngestError::EmptyComposite {
            name: name.to_string(),
        });
    }

    let mut sums = vec![0.0f64; df.height()];
    for item in items {
        let column = df
            .column(item)
            .map_err(|_| IngestError::ColumnNotFound {
                column: item.clone(),
            })?;
        if !is_numeric_dtype(column.dtype()) {
            return Err(IngestError::NonNumericColumn {
                column: item.clone(),
            });
        }
        for (idx, sum) in sums.iter_mut().enumerate() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            *sum += any_to_f64(value).unwrap_or(0.0);
        }
    }

    debug!(composite = name, items = ?items, "derived composite column");
    df.with_column(Series::new(name.into(), sums))?;
    Ok(())
}
