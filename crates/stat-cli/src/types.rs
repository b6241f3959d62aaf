use std::path::PathBuf;

use stat_ingest::ColumnInfo;
use stat_model::ColumnSummary;
use stat_report::{Findings, ReportFormat};

use crate::cli::ReportFormatArg;

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Markdown => ReportFormat::Markdown,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug)]
pub struct ColumnsResult {
    pub source: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    /// Descriptive label per column, when the file has a label row.
    pub labels: Vec<Option<String>>,
}

#[derive(Debug)]
pub struct DescribeResult {
    pub summaries: Vec<ColumnSummary>,
}

#[derive(Debug)]
pub struct AnalyzeResult {
    pub source: PathBuf,
    pub rows: usize,
    pub findings: Findings,
    pub report: Option<PathBuf>,
    /// True when the analysis reported an issue instead of a statistic.
    pub has_issue: bool,
}
