//! Integration tests for the pipeline module.

use std::io::Write;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tempfile::NamedTempFile;

use stat_cli::pipeline::{
    PairSelection, derive_composites, load_dataset, prepare_pair, resolve_pair,
};
use stat_model::{AnalysisMethod, Statistic, VariablePair};
use stat_report::collect_findings;

fn survey_df() -> DataFrame {
    let columns: Vec<Column> = vec![
        Series::new("q1".into(), &[Some(1i64), Some(2), None, Some(4)]).into_column(),
        Series::new("q2".into(), &[Some(2i64), Some(2), Some(3), None]).into_column(),
        Series::new("q3".into(), &[1.5f64, 2.5, 3.5, 4.5]).into_column(),
        Series::new("group".into(), &["a", "b", "a", "b"]).into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn column_f64(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

#[test]
fn test_default_pair_is_first_two_columns() {
    let pair = resolve_pair(&survey_df(), &PairSelection::default()).unwrap();
    assert_eq!(pair, VariablePair::new("q1", "q2"));
}

#[test]
fn test_explicit_columns_win() {
    let selection = PairSelection {
        x: Some("q3".to_string()),
        y: Some("group".to_string()),
        ..PairSelection::default()
    };
    let pair = resolve_pair(&survey_df(), &selection).unwrap();
    assert_eq!(pair, VariablePair::new("q3", "group"));
}

#[test]
fn test_unknown_column_is_rejected() {
    let selection = PairSelection {
        x: Some("missing".to_string()),
        ..PairSelection::default()
    };
    let error = resolve_pair(&survey_df(), &selection).unwrap_err();
    assert!(error.to_string().contains("column 'missing' not found"));
}

#[test]
fn test_composites_default_the_pair() {
    let mut df = survey_df();
    let selection = PairSelection {
        sum_x: vec!["q1".to_string(), "q2".to_string()],
        sum_y: vec!["q3".to_string()],
        ..PairSelection::default()
    };
    let pair = prepare_pair(&mut df, &selection).unwrap();
    assert_eq!(pair, VariablePair::new("X_Total", "Y_Total"));
    assert_eq!(column_f64(&df, "X_Total"), vec![3.0, 4.0, 3.0, 4.0]);
    assert_eq!(column_f64(&df, "Y_Total"), vec![1.5, 2.5, 3.5, 4.5]);
}

#[test]
fn test_composite_of_categorical_item_fails() {
    let mut df = survey_df();
    let selection = PairSelection {
        sum_x: vec!["group".to_string()],
        ..PairSelection::default()
    };
    let error = derive_composites(&mut df, &selection).unwrap_err();
    assert!(format!("{error:#}").starts_with("derive X_Total from group"));
}

#[test]
fn test_load_dataset_with_label_row() {
    let file = write_csv("Age in years,Sex\nage,sex\n34,F\n51,M\n");
    let dataset = load_dataset(file.path(), 2).unwrap();
    assert_eq!(dataset.df.height(), 2);
    assert_eq!(dataset.headers.label_for("age"), Some("Age in years"));
}

#[test]
fn test_load_missing_file_has_context() {
    let error = load_dataset(std::path::Path::new("does-not-exist.csv"), 1).unwrap_err();
    assert!(format!("{error:#}").starts_with("load does-not-exist.csv"));
}

#[test]
fn test_csv_to_findings() {
    let file = write_csv("gender,smoker\nM,yes\nF,no\nM,yes\nF,no\nM,no\nF,no\n");
    let mut dataset = load_dataset(file.path(), 1).unwrap();
    let pair = prepare_pair(&mut dataset.df, &PairSelection::default()).unwrap();
    let findings = collect_findings(&dataset.df, &pair).unwrap();
    assert_eq!(findings.analysis.method, AnalysisMethod::ChiSquare);
    assert_eq!(findings.columns.len(), 2);
    assert!(!findings.analysis.is_error());
}

#[test]
fn test_na_markers_are_dropped_pairwise() {
    let file = write_csv("a,b\n1,2\n2,4\nNA,5\n4,7\n5,9\n6,8\n");
    let mut dataset = load_dataset(file.path(), 1).unwrap();
    let pair = prepare_pair(&mut dataset.df, &PairSelection::default()).unwrap();
    let findings = collect_findings(&dataset.df, &pair).unwrap();

    assert_ne!(findings.analysis.method, AnalysisMethod::MixedTypes);
    let Some(Statistic::Correlation(statistic)) = &findings.analysis.statistic else {
        panic!("expected a correlation statistic");
    };
    assert_eq!(statistic.sample_size, 5);
}
