//! Analysis report generation.
//!
//! A [`Report`] is an ordered list of headings, text, tables and chart
//! descriptors. It is rendered to Markdown or JSON; turning chart
//! descriptors into images is left to the consumer.

mod common;
mod document;
mod findings;
mod markdown;

pub use common::{ReportFormat, compute_file_sha256, render, render_json, write_report};
pub use document::{
    ASSOCIATION_HEADING, Block, DEFAULT_TITLE, DESCRIPTIVE_HEADING, Report, ReportOptions,
    SourceFingerprint, TableBlock, build_report,
};
pub use findings::{ColumnSection, Findings, collect_findings};
pub use markdown::{chart_summary, render_markdown};
