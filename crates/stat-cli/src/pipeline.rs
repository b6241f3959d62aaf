//! Dataset preparation shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use stat_ingest::{CsvHeaders, X_COMPOSITE, Y_COMPOSITE, add_composite_column, read_csv_table};
use stat_model::VariablePair;

/// A loaded CSV file.
#[derive(Debug)]
pub struct LoadedDataset {
    pub df: DataFrame,
    pub headers: CsvHeaders,
}

pub fn load_dataset(path: &Path, header_rows: usize) -> Result<LoadedDataset> {
    let (df, headers) =
        read_csv_table(path, header_rows).with_context(|| format!("load {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(LoadedDataset { df, headers })
}

/// Which variables to analyze, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct PairSelection {
    pub x: Option<String>,
    pub y: Option<String>,
    /// Items summed into [`X_COMPOSITE`].
    pub sum_x: Vec<String>,
    /// Items summed into [`Y_COMPOSITE`].
    pub sum_y: Vec<String>,
}

/// Adds the composite columns requested by `selection`.
pub fn derive_composites(df: &mut DataFrame, selection: &PairSelection) -> Result<()> {
    for (name, items) in [(X_COMPOSITE, &selection.sum_x), (Y_COMPOSITE, &selection.sum_y)] {
        if items.is_empty() {
            continue;
        }
        add_composite_column(df, name, items)
            .with_context(|| format!("derive {name} from {}", items.join(", ")))?;
    }
    Ok(())
}

/// Resolves the variable pair, falling back to composites and then to the
/// first two columns.
///
/// A single-column dataset pairs the column with itself.
pub fn resolve_pair(df: &DataFrame, selection: &PairSelection) -> Result<VariablePair> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let Some(first) = names.first() else {
        bail!("dataset has no columns");
    };
    let second = names.get(1).unwrap_or(first);

    let x = match (&selection.x, selection.sum_x.is_empty()) {
        (Some(x), _) => x.clone(),
        (None, false) => X_COMPOSITE.to_string(),
        (None, true) => first.clone(),
    };
    let y = match (&selection.y, selection.sum_y.is_empty()) {
        (Some(y), _) => y.clone(),
        (None, false) => Y_COMPOSITE.to_string(),
        (None, true) => second.clone(),
    };

    for column in [&x, &y] {
        if !names.contains(column) {
            bail!("column '{column}' not found (available: {})", names.join(", "));
        }
    }
    debug!(x = %x, y = %y, "resolved variable pair");
    Ok(VariablePair::new(x, y))
}

/// Derives composites, then resolves the pair against the extended dataset.
pub fn prepare_pair(df: &mut DataFrame, selection: &PairSelection) -> Result<VariablePair> {
    derive_composites(df, selection)?;
    resolve_pair(df, selection)
}
