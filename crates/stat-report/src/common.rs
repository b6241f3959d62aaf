//! Shared helpers for report output.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::document::Report;
use crate::markdown::render_markdown;

/// Buffer size for reading files during checksum computation.
const BUFFER_SIZE: usize = 65536;

/// Output format of a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

/// SHA-256 of a file as lowercase hex.
pub fn compute_file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

pub fn render(report: &Report, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Json => render_json(report),
    }
}

/// Renders `report` and writes it to `path`.
pub fn write_report(report: &Report, path: &Path, format: ReportFormat) -> Result<()> {
    let contents = render(report, format)?;
    std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), format = format.extension(), "wrote report");
    Ok(())
}
