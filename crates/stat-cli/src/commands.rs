use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span};

use stat_analysis::describe;
use stat_cli::pipeline::{PairSelection, load_dataset, prepare_pair};
use stat_ingest::list_columns;
use stat_report::{Report, ReportOptions, SourceFingerprint, collect_findings, write_report};

use crate::cli::{AnalyzeArgs, ColumnsArgs, DescribeArgs};
use crate::types::{AnalyzeResult, ColumnsResult, DescribeResult};

pub fn run_columns(args: &ColumnsArgs, header_rows: usize) -> Result<ColumnsResult> {
    let dataset = load_dataset(&args.file, header_rows)?;
    let columns = list_columns(&dataset.df);
    let labels = columns
        .iter()
        .map(|info| dataset.headers.label_for(&info.name).map(str::to_string))
        .collect();
    Ok(ColumnsResult {
        source: args.file.clone(),
        rows: dataset.df.height(),
        columns,
        labels,
    })
}

pub fn run_describe(args: &DescribeArgs, header_rows: usize) -> Result<DescribeResult> {
    let dataset = load_dataset(&args.file, header_rows)?;
    let summaries = args
        .columns
        .iter()
        .map(|column| {
            describe(&dataset.df, column).with_context(|| format!("describe column '{column}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DescribeResult { summaries })
}

pub fn run_analyze(args: &AnalyzeArgs, header_rows: usize) -> Result<AnalyzeResult> {
    let span = info_span!("analyze", file = %args.file.display());
    let _guard = span.enter();
    let started = Instant::now();

    let mut dataset = load_dataset(&args.file, header_rows)?;
    let selection = PairSelection {
        x: args.x.clone(),
        y: args.y.clone(),
        sum_x: args.sum_x.clone(),
        sum_y: args.sum_y.clone(),
    };
    let pair = prepare_pair(&mut dataset.df, &selection)?;
    let findings = collect_findings(&dataset.df, &pair)?;
    info!(
        x = %pair.x,
        y = %pair.y,
        method = %findings.analysis.method,
        "analysis complete"
    );

    if let Some(path) = &args.report {
        let options = ReportOptions {
            title: None,
            generated_at: Some(Utc::now()),
            source: Some(
                SourceFingerprint::from_path(&args.file)
                    .with_context(|| format!("fingerprint {}", args.file.display()))?,
            ),
        };
        let report = Report::from_findings(&findings, options);
        write_report(&report, path, args.report_format.into())?;
        info!(path = %path.display(), "wrote report");
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analyze finished"
    );
    let has_issue = findings.analysis.is_error();
    Ok(AnalyzeResult {
        source: args.file.clone(),
        rows: dataset.df.height(),
        findings,
        report: args.report.clone(),
        has_issue,
    })
}
