//! Report document model.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use stat_model::{ChartDescriptor, ColumnSummary, FREQUENCY_DISPLAY_LIMIT, VariablePair};

use crate::common::compute_file_sha256;
use crate::findings::{Findings, collect_findings};

pub const DEFAULT_TITLE: &str = "Statistical Analysis Report";
pub const DESCRIPTIVE_HEADING: &str = "Descriptive Statistics";
pub const ASSOCIATION_HEADING: &str = "Association Analysis";

/// Input file a report was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    pub file_name: String,
    pub sha256: String,
}

impl SourceFingerprint {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            file_name,
            sha256: compute_file_sha256(path)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One element of the report, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Subheading { text: String },
    Text { text: String },
    Table(TableBlock),
    Chart(ChartDescriptor),
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Defaults to [`DEFAULT_TITLE`].
    pub title: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub source: Option<SourceFingerprint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// RFC 3339 timestamp, UTC.
    pub generated_at: Option<String>,
    pub source: Option<SourceFingerprint>,
    pub blocks: Vec<Block>,
}

impl Report {
    /// Lays out computed findings as report blocks.
    pub fn from_findings(findings: &Findings, options: ReportOptions) -> Self {
        let mut blocks = vec![Block::Heading {
            text: DESCRIPTIVE_HEADING.to_string(),
        }];

        for section in &findings.columns {
            let column = section.summary.column();
            blocks.push(Block::Subheading {
                text: format!("Variable: {column}"),
            });
            blocks.push(Block::Table(summary_table(&section.summary)));
            blocks.extend(section.charts.iter().cloned().map(Block::Chart));
            let text = match &section.summary {
                ColumnSummary::Numeric(stats) => stats.summary_line(),
                ColumnSummary::Categorical(_) => format!("Categorical: {column}"),
            };
            blocks.push(Block::Text { text });
        }

        let analysis = &findings.analysis;
        blocks.push(Block::Heading {
            text: ASSOCIATION_HEADING.to_string(),
        });
        blocks.push(Block::Subheading {
            text: format!("Method: {}", analysis.method),
        });
        blocks.push(Block::Text {
            text: analysis
                .metrics
                .iter()
                .map(|metric| format!("{}: {}", metric.name, metric.value))
                .collect::<Vec<_>>()
                .join("\n"),
        });
        if let Some(chart) = &analysis.chart {
            blocks.push(Block::Chart(chart.clone()));
        }

        Self {
            title: options.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            generated_at: options
                .generated_at
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            source: options.source,
            blocks,
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartDescriptor> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chart(chart) => Some(chart),
            _ => None,
        })
    }
}

fn summary_table(summary: &ColumnSummary) -> TableBlock {
    match summary {
        ColumnSummary::Numeric(stats) => TableBlock {
            headers: vec!["Statistic".to_string(), "Value".to_string()],
            rows: stats
                .entries()
                .iter()
                .map(|(label, value)| vec![(*label).to_string(), format!("{value:.2}")])
                .collect(),
        },
        ColumnSummary::Categorical(table) => TableBlock {
            headers: vec!["Category".to_string(), "Frequency".to_string()],
            rows: table
                .top(FREQUENCY_DISPLAY_LIMIT)
                .iter()
                .map(|entry| vec![entry.category.clone(), entry.count.to_string()])
                .collect(),
        },
    }
}

/// Analyzes `pair` and lays the results out as a report.
pub fn build_report(df: &DataFrame, pair: &VariablePair, options: ReportOptions) -> Result<Report> {
    let findings = collect_findings(df, pair)?;
    Ok(Report::from_findings(&findings, options))
}
