//! Everything a report shows, computed once.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use stat_analysis::{analyze_pair, describe, describe_charts};
use stat_model::{AnalysisResult, ChartDescriptor, ColumnSummary, VariablePair};

/// Summary and charts of one selected column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSection {
    pub summary: ColumnSummary,
    pub charts: Vec<ChartDescriptor>,
}

/// Descriptive sections for each distinct selected column plus the
/// association result for the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Findings {
    pub pair: VariablePair,
    pub columns: Vec<ColumnSection>,
    pub analysis: AnalysisResult,
}

/// Runs the descriptive and association analyses for `pair`.
pub fn collect_findings(df: &DataFrame, pair: &VariablePair) -> Result<Findings> {
    let mut columns = Vec::new();
    for column in pair.distinct_columns() {
        let summary =
            describe(df, column).with_context(|| format!("describe column '{column}'"))?;
        let charts = describe_charts(df, column)
            .with_context(|| format!("build charts for column '{column}'"))?;
        columns.push(ColumnSection { summary, charts });
    }
    let analysis = analyze_pair(df, pair)
        .with_context(|| format!("analyze '{}' against '{}'", pair.x, pair.y))?;
    Ok(Findings {
        pair: pair.clone(),
        columns,
        analysis,
    })
}
