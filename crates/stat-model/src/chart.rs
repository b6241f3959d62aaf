//! Renderer-independent chart descriptors.
//!
//! Descriptors carry only labels, series and table contents. Turning them
//! into images or document fragments is the job of a separate renderer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartDescriptor {
    Scatter(ScatterChart),
    Heatmap(HeatmapChart),
    Histogram(HistogramChart),
    BoxPlot(BoxPlotChart),
    Bar(BarChart),
}

impl ChartDescriptor {
    pub fn title(&self) -> &str {
        match self {
            ChartDescriptor::Scatter(chart) => &chart.title,
            ChartDescriptor::Heatmap(chart) => &chart.title,
            ChartDescriptor::Histogram(chart) => &chart.title,
            ChartDescriptor::BoxPlot(chart) => &chart.title,
            ChartDescriptor::Bar(chart) => &chart.title,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartDescriptor::Scatter(_) => "scatter",
            ChartDescriptor::Heatmap(_) => "heatmap",
            ChartDescriptor::Histogram(_) => "histogram",
            ChartDescriptor::BoxPlot(_) => "boxplot",
            ChartDescriptor::Bar(_) => "bar",
        }
    }
}

/// Scatter plot of X against Y, optionally overlaid with a least-squares line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    pub fit: Option<RegressionLine>,
}

/// `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Heatmap of a contingency table; every cell is annotated with its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub title: String,
    pub row_label: String,
    pub column_label: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChart {
    pub title: String,
    pub label: String,
    pub bins: Vec<HistogramBin>,
}

/// Half-open bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotChart {
    pub title: String,
    pub label: String,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, u64)>,
}
