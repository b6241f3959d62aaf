//! Tests for stat-model types.

use stat_model::{
    AnalysisIssue, AnalysisMethod, AnalysisResult, ChartDescriptor, ColumnKind, ColumnSummary,
    DescriptiveStats, FrequencyEntry, FrequencyTable, HeatmapChart, Metric, RegressionLine,
    VariablePair,
};

fn frequency_table() -> FrequencyTable {
    FrequencyTable {
        column: "Grade".to_string(),
        entries: ["A", "B", "C", "D", "E", "F"]
            .iter()
            .zip([9u64, 7, 5, 3, 2, 1])
            .map(|(category, count)| FrequencyEntry {
                category: (*category).to_string(),
                count,
            })
            .collect(),
    }
}

#[test]
fn frequency_table_top_truncates() {
    let table = frequency_table();
    assert_eq!(table.top(5).len(), 5);
    assert_eq!(table.top(5)[0].category, "A");
    assert_eq!(table.top(10).len(), 6);
    assert_eq!(table.total(), 27);
    assert_eq!(table.count_of("D"), Some(3));
    assert_eq!(table.count_of("Z"), None);
}

#[test]
fn descriptive_summary_line_uses_two_decimals() {
    let stats = DescriptiveStats {
        column: "score".to_string(),
        count: 5,
        mean: 2.4,
        median: 2.0,
        mode: 2.0,
        min: 1.0,
        max: 4.0,
        std: 1.140_175_425,
    };
    assert_eq!(
        stats.summary_line(),
        "Mean: 2.40, Median: 2.00, Mode: 2.00, Min: 1.00, Max: 4.00, Std: 1.14"
    );
}

#[test]
fn variable_pair_distinct_columns() {
    assert_eq!(VariablePair::new("a", "b").distinct_columns(), vec!["a", "b"]);
    assert_eq!(VariablePair::new("a", "a").distinct_columns(), vec!["a"]);
}

#[test]
fn column_kind_labels() {
    assert_eq!(ColumnKind::Numeric.to_string(), "Numeric");
    assert!(!ColumnKind::Categorical.is_numeric());
}

#[test]
fn regression_line_predicts() {
    let line = RegressionLine {
        slope: 2.0,
        intercept: 1.0,
    };
    assert_eq!(line.predict(3.0), 7.0);
}

#[test]
fn result_serializes_with_tagged_chart() {
    let result = AnalysisResult {
        method: AnalysisMethod::ChiSquare,
        metrics: vec![Metric::new("Result", "Not Significant")],
        chart: Some(ChartDescriptor::Heatmap(HeatmapChart {
            title: "Heatmap: a vs b".to_string(),
            row_label: "a".to_string(),
            column_label: "b".to_string(),
            rows: vec!["x".to_string()],
            columns: vec!["y".to_string()],
            cells: vec![vec![3]],
        })),
        statistic: None,
        issue: None,
    };
    let json = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(json["method"], "chi_square");
    assert_eq!(json["chart"]["kind"], "heatmap");
    assert_eq!(result.chart.as_ref().map(ChartDescriptor::kind_name), Some("heatmap"));
    assert_eq!(json["chart"]["cells"][0][0], 3);

    let round: AnalysisResult = serde_json::from_value(json).expect("deserialize result");
    assert_eq!(round, result);
}

#[test]
fn summary_serializes_kind_tag() {
    let summary = ColumnSummary::Categorical(frequency_table());
    let json = serde_json::to_value(&summary).expect("serialize summary");
    assert_eq!(json["kind"], "categorical");
    assert_eq!(summary.column(), "Grade");
}

#[test]
fn issue_messages() {
    assert_eq!(AnalysisIssue::EmptyData.to_string(), "No valid data");
    let result = AnalysisResult::from_issue(
        AnalysisMethod::MixedTypes,
        AnalysisIssue::UnsupportedTypeCombination,
    );
    assert_eq!(
        result.error_message(),
        Some("Please select two numeric or two categorical variables.")
    );
}
