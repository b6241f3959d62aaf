//! Data model for tabular association analysis.
//!
//! Everything here is plain data: no dataframe or rendering dependency, so
//! results can be serialized, embedded in reports, or handed to a renderer.

pub mod analysis;
pub mod chart;
pub mod column;
pub mod summary;

pub use analysis::{
    AnalysisIssue, AnalysisMethod, AnalysisResult, CHI2_METRIC, COEFFICIENT_METRIC,
    ChiSquareStatistic, CorrelationStatistic, ERROR_METRIC, INTERPRETATION_METRIC, Metric,
    NORMALITY_X_METRIC, NORMALITY_Y_METRIC, NormalityCheck, P_VALUE_METRIC, RESULT_METRIC,
    Statistic,
};
pub use chart::{
    BarChart, BoxPlotChart, ChartDescriptor, HeatmapChart, HistogramBin, HistogramChart,
    RegressionLine, ScatterChart,
};
pub use column::{ColumnKind, VariablePair};
pub use summary::{
    ColumnSummary, DescriptiveStats, FREQUENCY_DISPLAY_LIMIT, FrequencyEntry, FrequencyTable,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_result_carries_error_metric_only() {
        let result =
            AnalysisResult::from_issue(AnalysisMethod::Error, AnalysisIssue::EmptyData);
        assert_eq!(result.metrics.len(), 1);
        assert_eq!(result.metric(ERROR_METRIC), Some("No valid data"));
        assert!(result.chart.is_none());
        assert!(result.statistic.is_none());
        assert!(result.is_error());
    }

    #[test]
    fn method_display_names() {
        assert_eq!(AnalysisMethod::Pearson.to_string(), "Pearson Correlation");
        assert_eq!(
            AnalysisMethod::Spearman.to_string(),
            "Spearman Rank Correlation"
        );
        assert_eq!(AnalysisMethod::ChiSquare.to_string(), "Chi-Square Test");
        assert_eq!(
            AnalysisMethod::MixedTypes.to_string(),
            "Mixed Types (Not Supported)"
        );
    }
}
