//! Single-column summaries and their charts.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use stat_model::{
    BarChart, BoxPlotChart, ChartDescriptor, ColumnKind, ColumnSummary, DescriptiveStats,
    FrequencyEntry, FrequencyTable, HistogramBin, HistogramChart,
};
use tracing::debug;

use crate::data_utils::{category_values, column_kind, numeric_values};
use crate::error::Result;

/// Whisker reach in interquartile ranges.
pub const WHISKER_IQR: f64 = 1.5;

/// Summarizes one column: descriptive statistics when numeric, a frequency
/// table when categorical. Missing values are ignored.
pub fn describe(df: &DataFrame, column: &str) -> Result<ColumnSummary> {
    let summary = match column_kind(df, column)? {
        ColumnKind::Numeric => {
            ColumnSummary::Numeric(descriptive_stats(column, &numeric_values(df, column)?))
        }
        ColumnKind::Categorical => {
            ColumnSummary::Categorical(frequency_table(column, &category_values(df, column)?))
        }
    };
    debug!(column, kind = summary_kind(&summary), "described column");
    Ok(summary)
}

fn summary_kind(summary: &ColumnSummary) -> &'static str {
    match summary {
        ColumnSummary::Numeric(_) => ColumnKind::Numeric.as_str(),
        ColumnSummary::Categorical(_) => ColumnKind::Categorical.as_str(),
    }
}

/// Charts shown alongside a column summary: histogram and box plot for
/// numeric columns, a frequency bar chart for categorical ones.
///
/// A column with no values has no charts.
pub fn describe_charts(df: &DataFrame, column: &str) -> Result<Vec<ChartDescriptor>> {
    let charts = match describe(df, column)? {
        ColumnSummary::Numeric(_) => {
            let values = numeric_values(df, column)?;
            if values.is_empty() {
                Vec::new()
            } else {
                vec![
                    ChartDescriptor::Histogram(histogram(column, &values)),
                    ChartDescriptor::BoxPlot(box_plot(column, &values)),
                ]
            }
        }
        ColumnSummary::Categorical(table) if table.entries.is_empty() => Vec::new(),
        ColumnSummary::Categorical(table) => vec![ChartDescriptor::Bar(frequency_chart(&table))],
    };
    Ok(charts)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Descriptive statistics of `values`.
pub fn descriptive_stats(column: &str, values: &[f64]) -> DescriptiveStats {
    let count = values.len();
    let sorted = sorted(values);
    let mean = if count == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / count as f64
    };
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    DescriptiveStats {
        column: column.to_string(),
        count,
        mean,
        median: quantile(&sorted, 0.5),
        mode: mode(&sorted),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        max: sorted.last().copied().unwrap_or(f64::NAN),
        std,
    }
}

/// Smallest of the most frequent values, or NaN when no value repeats.
fn mode(sorted: &[f64]) -> f64 {
    let mut best = f64::NAN;
    let mut best_count = 1;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        if end - start > best_count {
            best_count = end - start;
            best = sorted[start];
        }
        start = end;
    }
    best
}

/// Linear-interpolation quantile of sorted values; NaN when empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let position = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

/// Category counts, most frequent first; ties keep ascending category order.
pub fn frequency_table(column: &str, values: &[String]) -> FrequencyTable {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(category, count)| FrequencyEntry {
            category: category.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    FrequencyTable {
        column: column.to_string(),
        entries,
    }
}

/// Number of histogram bins by Sturges' rule.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width histogram over the value range.
pub fn histogram(column: &str, values: &[f64]) -> HistogramChart {
    let sorted = sorted(values);
    let title = format!("Histogram: {column}");
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return HistogramChart {
            title,
            label: column.to_string(),
            bins: Vec::new(),
        };
    };

    let bin_count = if max > min { sturges_bins(sorted.len()) } else { 1 };
    let (lower, upper) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (upper - lower) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: if i + 1 == bin_count {
                upper
            } else {
                lower + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for value in &sorted {
        let index = (((value - lower) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    HistogramChart {
        title,
        label: column.to_string(),
        bins,
    }
}

/// Five-number box plot with 1.5 IQR whiskers.
pub fn box_plot(column: &str, values: &[f64]) -> BoxPlotChart {
    let sorted = sorted(values);
    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR * iqr;
    let high_fence = q3 + WHISKER_IQR * iqr;

    let mut inside = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside.next().unwrap_or(f64::NAN);
    let upper_whisker = inside.last().unwrap_or(lower_whisker);

    BoxPlotChart {
        title: format!("Boxplot: {column}"),
        label: column.to_string(),
        lower_whisker,
        q1,
        median: quantile(&sorted, 0.5),
        q3,
        upper_whisker,
        outliers: sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect(),
    }
}

/// Bar chart of every category in the table.
pub fn frequency_chart(table: &FrequencyTable) -> BarChart {
    BarChart {
        title: format!("Frequency: {}", table.column),
        x_label: "Category".to_string(),
        y_label: "Frequency".to_string(),
        bars: table
            .entries
            .iter()
            .map(|entry| (entry.category.clone(), entry.count))
            .collect(),
    }
}
