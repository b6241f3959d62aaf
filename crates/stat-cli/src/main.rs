//! Association analyzer CLI.

use clap::{ColorChoice, Parser};
use stat_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_analyze, run_columns, run_describe};
use crate::summary::{print_analysis, print_columns, print_descriptive};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let header_rows = usize::from(cli.header_rows);
    let exit_code = match &cli.command {
        Command::Columns(args) => match run_columns(args, header_rows) {
            Ok(result) => {
                print_columns(&result);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Describe(args) => match run_describe(args, header_rows) {
            Ok(result) => {
                print_descriptive(&result);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Analyze(args) => match run_analyze(args, header_rows) {
            Ok(result) => {
                if args.json {
                    match serde_json::to_string_pretty(&result.findings) {
                        Ok(json) => println!("{json}"),
                        Err(error) => {
                            eprintln!("error: serialize findings: {error}");
                            std::process::exit(1);
                        }
                    }
                } else {
                    print_analysis(&result);
                }
                if result.has_issue { 1 } else { 0 }
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
