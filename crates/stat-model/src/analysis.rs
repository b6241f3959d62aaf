use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::ChartDescriptor;

/// Metric name used for error-kind outcomes.
pub const ERROR_METRIC: &str = "Error";

pub const COEFFICIENT_METRIC: &str = "Coefficient (r)";
pub const P_VALUE_METRIC: &str = "p-value";
pub const NORMALITY_X_METRIC: &str = "Normality X (p)";
pub const NORMALITY_Y_METRIC: &str = "Normality Y (p)";
pub const INTERPRETATION_METRIC: &str = "Interpretation";
pub const CHI2_METRIC: &str = "Chi2 Stat";
pub const RESULT_METRIC: &str = "Result";

/// Statistical method chosen for a variable pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    Pearson,
    Spearman,
    ChiSquare,
    MixedTypes,
    /// No analysis could run (no complete rows).
    Error,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Pearson => "Pearson Correlation",
            AnalysisMethod::Spearman => "Spearman Rank Correlation",
            AnalysisMethod::ChiSquare => "Chi-Square Test",
            AnalysisMethod::MixedTypes => "Mixed Types (Not Supported)",
            AnalysisMethod::Error => "Error",
        }
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recoverable problems reported inside an [`AnalysisResult`] instead of as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisIssue {
    /// No rows survive pairwise complete-case filtering.
    EmptyData,
    /// One numeric and one categorical variable.
    UnsupportedTypeCombination,
}

impl AnalysisIssue {
    pub fn message(&self) -> &'static str {
        match self {
            AnalysisIssue::EmptyData => "No valid data",
            AnalysisIssue::UnsupportedTypeCombination => {
                "Please select two numeric or two categorical variables."
            }
        }
    }
}

impl fmt::Display for AnalysisIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A named, pre-formatted result value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: String,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of a Shapiro-Wilk normality check on one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityCheck {
    /// W statistic (0 when the test was not run).
    pub statistic: f64,
    /// p-value (0 when the test was not run).
    pub p_value: f64,
    pub is_normal: bool,
    /// False when the sample was too small to run the test.
    pub tested: bool,
}

impl NormalityCheck {
    pub fn untested() -> Self {
        Self {
            statistic: 0.0,
            p_value: 0.0,
            is_normal: false,
            tested: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationStatistic {
    pub coefficient: f64,
    pub p_value: f64,
    pub sample_size: usize,
    pub normality_x: NormalityCheck,
    pub normality_y: NormalityCheck,
    pub interpretation: String,
}

/// Chi-square test of independence over a contingency table.
///
/// `observed[i][j]` counts rows with the i-th X category and the j-th Y
/// category; `expected` has the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareStatistic {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub observed: Vec<Vec<u64>>,
    pub expected: Vec<Vec<f64>>,
}

/// Raw numeric values behind the formatted metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statistic {
    Correlation(CorrelationStatistic),
    ChiSquare(ChiSquareStatistic),
}

/// Immutable output of one association analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub method: AnalysisMethod,
    pub metrics: Vec<Metric>,
    pub chart: Option<ChartDescriptor>,
    pub statistic: Option<Statistic>,
    pub issue: Option<AnalysisIssue>,
}

impl AnalysisResult {
    /// Error-kind outcome: a single `Error` metric, no statistic, no chart.
    pub fn from_issue(method: AnalysisMethod, issue: AnalysisIssue) -> Self {
        Self {
            method,
            metrics: vec![Metric::new(ERROR_METRIC, issue.message())],
            chart: None,
            statistic: None,
            issue: Some(issue),
        }
    }

    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| metric.value.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.issue.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.issue.as_ref().map(AnalysisIssue::message)
    }
}
