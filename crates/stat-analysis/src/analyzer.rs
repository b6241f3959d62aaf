//! Association analysis with automatic method selection.
//!
//! | X           | Y           | Method                                   |
//! |-------------|-------------|------------------------------------------|
//! | numeric     | numeric     | Pearson if both normal, else Spearman    |
//! | categorical | categorical | Chi-square test of independence          |
//! | mixed       |             | not supported (issue, no statistic)      |
//!
//! Rows where either variable is missing are dropped first; if none remain
//! the outcome is an [`AnalysisIssue::EmptyData`] result whatever the types.

use polars::prelude::DataFrame;
use stat_model::{
    AnalysisIssue, AnalysisMethod, AnalysisResult, CHI2_METRIC, COEFFICIENT_METRIC,
    ChartDescriptor, ChiSquareStatistic, ColumnKind, CorrelationStatistic, HeatmapChart,
    INTERPRETATION_METRIC, Metric, NORMALITY_X_METRIC, NORMALITY_Y_METRIC, P_VALUE_METRIC,
    RESULT_METRIC, ScatterChart, Statistic, VariablePair,
};
use tracing::{debug, debug_span};

use crate::contingency::{ContingencyTable, chi_square_test};
use crate::correlation::{linear_fit, pearson, spearman};
use crate::data_utils::{categories_at, column_kind, complete_rows, numeric_at};
use crate::error::{AnalysisError, Result};
use crate::interpret::{Significance, interpret_correlation};
use crate::normality::check_normality;

/// Analyzes the association between columns `x` and `y`.
pub fn analyze(df: &DataFrame, x: &str, y: &str) -> Result<AnalysisResult> {
    analyze_pair(df, &VariablePair::new(x, y))
}

/// Analyzes the association between the two columns of `pair`.
///
/// Missing columns and degenerate numeric input are errors. Empty data and
/// mixed column kinds come back as a result carrying an [`AnalysisIssue`].
pub fn analyze_pair(df: &DataFrame, pair: &VariablePair) -> Result<AnalysisResult> {
    let span = debug_span!("analyze", x = %pair.x, y = %pair.y);
    let _guard = span.enter();

    let x_kind = column_kind(df, &pair.x)?;
    let y_kind = column_kind(df, &pair.y)?;
    let rows = complete_rows(df, &pair.x, &pair.y)?;
    debug!(
        x_kind = %x_kind,
        y_kind = %y_kind,
        complete_rows = rows.len(),
        "classified variable pair"
    );
    if rows.is_empty() {
        return Ok(AnalysisResult::from_issue(
            AnalysisMethod::Error,
            AnalysisIssue::EmptyData,
        ));
    }

    match (x_kind, y_kind) {
        (ColumnKind::Numeric, ColumnKind::Numeric) => correlation_analysis(df, pair, &rows),
        (ColumnKind::Categorical, ColumnKind::Categorical) => {
            chi_square_analysis(df, pair, &rows)
        }
        _ => Ok(AnalysisResult::from_issue(
            AnalysisMethod::MixedTypes,
            AnalysisIssue::UnsupportedTypeCombination,
        )),
    }
}

fn format_value(value: f64) -> String {
    format!("{value:.4}")
}

fn correlation_analysis(
    df: &DataFrame,
    pair: &VariablePair,
    rows: &[usize],
) -> Result<AnalysisResult> {
    let x = numeric_at(df, &pair.x, rows)?;
    let y = numeric_at(df, &pair.y, rows)?;

    let normality_x = check_normality(&x).map_err(|source| {
        AnalysisError::computation(format!("normality test of '{}'", pair.x), source)
    })?;
    let normality_y = check_normality(&y).map_err(|source| {
        AnalysisError::computation(format!("normality test of '{}'", pair.y), source)
    })?;

    let method = if normality_x.is_normal && normality_y.is_normal {
        AnalysisMethod::Pearson
    } else {
        AnalysisMethod::Spearman
    };
    let context = || format!("{method} of '{}' and '{}'", pair.x, pair.y);
    let correlation = match method {
        AnalysisMethod::Pearson => pearson(&x, &y),
        _ => spearman(&x, &y),
    }
    .map_err(|source| AnalysisError::computation(context(), source))?;
    let fit = if method == AnalysisMethod::Pearson {
        Some(linear_fit(&x, &y).map_err(|source| AnalysisError::computation(context(), source))?)
    } else {
        None
    };
    debug!(
        method = %method,
        n = correlation.sample_size,
        coefficient = correlation.coefficient,
        p_value = correlation.p_value,
        "computed correlation"
    );

    let interpretation =
        interpret_correlation(correlation.coefficient, correlation.p_value).to_string();
    let metrics = vec![
        Metric::new(COEFFICIENT_METRIC, format_value(correlation.coefficient)),
        Metric::new(P_VALUE_METRIC, format_value(correlation.p_value)),
        Metric::new(NORMALITY_X_METRIC, format_value(normality_x.p_value)),
        Metric::new(NORMALITY_Y_METRIC, format_value(normality_y.p_value)),
        Metric::new(INTERPRETATION_METRIC, interpretation.clone()),
    ];
    let chart = ChartDescriptor::Scatter(ScatterChart {
        title: format!("Scatterplot: {} vs {}", pair.x, pair.y),
        x_label: pair.x.clone(),
        y_label: pair.y.clone(),
        points: x.iter().copied().zip(y.iter().copied()).collect(),
        fit,
    });

    Ok(AnalysisResult {
        method,
        metrics,
        chart: Some(chart),
        statistic: Some(Statistic::Correlation(CorrelationStatistic {
            coefficient: correlation.coefficient,
            p_value: correlation.p_value,
            sample_size: correlation.sample_size,
            normality_x,
            normality_y,
            interpretation,
        })),
        issue: None,
    })
}

fn chi_square_analysis(
    df: &DataFrame,
    pair: &VariablePair,
    rows: &[usize],
) -> Result<AnalysisResult> {
    let x = categories_at(df, &pair.x, rows)?;
    let y = categories_at(df, &pair.y, rows)?;
    let table = ContingencyTable::from_pairs(&x, &y).map_err(|source| {
        AnalysisError::computation(
            format!("contingency table of '{}' and '{}'", pair.x, pair.y),
            source,
        )
    })?;
    let test = chi_square_test(&table);
    debug!(
        rows = table.rows.len(),
        columns = table.columns.len(),
        dof = test.degrees_of_freedom,
        statistic = test.statistic,
        p_value = test.p_value,
        "computed chi-square test"
    );

    let metrics = vec![
        Metric::new(CHI2_METRIC, format_value(test.statistic)),
        Metric::new(P_VALUE_METRIC, format_value(test.p_value)),
        Metric::new(
            RESULT_METRIC,
            Significance::from_p_value(test.p_value).to_string(),
        ),
    ];
    let chart = ChartDescriptor::Heatmap(HeatmapChart {
        title: format!("Heatmap: {} vs {}", pair.x, pair.y),
        row_label: pair.x.clone(),
        column_label: pair.y.clone(),
        rows: table.rows.clone(),
        columns: table.columns.clone(),
        cells: table.counts.clone(),
    });

    Ok(AnalysisResult {
        method: AnalysisMethod::ChiSquare,
        metrics,
        chart: Some(chart),
        statistic: Some(Statistic::ChiSquare(ChiSquareStatistic {
            statistic: test.statistic,
            p_value: test.p_value,
            degrees_of_freedom: test.degrees_of_freedom,
            rows: table.rows,
            columns: table.columns,
            observed: table.counts,
            expected: test.expected,
        })),
        issue: None,
    })
}
