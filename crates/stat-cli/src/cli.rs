//! CLI argument definitions for the association analyzer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "stat-analyzer",
    version,
    about = "Descriptive statistics and association analysis for CSV datasets",
    long_about = "Describe CSV columns and test the association between two variables.\n\n\
                  Numeric pairs use Pearson or Spearman correlation depending on a\n\
                  Shapiro-Wilk normality check; categorical pairs use a chi-square test."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Number of header rows in the CSV (2 = labels row followed by names row).
    #[arg(
        long = "header-rows",
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=2),
        global = true
    )]
    pub header_rows: u8,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the columns of a CSV file with their type and completeness.
    Columns(ColumnsArgs),

    /// Print descriptive statistics for one or more columns.
    Describe(DescribeArgs),

    /// Describe two variables and test their association.
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Path to the CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Path to the CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Columns to describe.
    #[arg(value_name = "COLUMN", required = true)]
    pub columns: Vec<String>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// X variable (default: X_Total when --sum-x is given, else the first column).
    #[arg(long = "x", value_name = "COLUMN")]
    pub x: Option<String>,

    /// Y variable (default: Y_Total when --sum-y is given, else the second column).
    #[arg(long = "y", value_name = "COLUMN")]
    pub y: Option<String>,

    /// Numeric item summed into the X_Total composite (repeatable).
    #[arg(long = "sum-x", value_name = "COLUMN")]
    pub sum_x: Vec<String>,

    /// Numeric item summed into the Y_Total composite (repeatable).
    #[arg(long = "sum-y", value_name = "COLUMN")]
    pub sum_y: Vec<String>,

    /// Write a report document to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Report document format.
    #[arg(long = "report-format", value_enum, default_value = "markdown")]
    pub report_format: ReportFormatArg,

    /// Print the findings as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Markdown,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
