//! Markdown rendering.

use std::fmt::Write;

use stat_model::ChartDescriptor;

use crate::document::{Block, Report, TableBlock};

/// Renders the report as a Markdown document.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", report.title);

    let mut meta = Vec::new();
    if let Some(at) = &report.generated_at {
        meta.push(format!("Generated: {at}"));
    }
    if let Some(source) = &report.source {
        meta.push(format!("Source: {} (sha256 {})", source.file_name, source.sha256));
    }
    if !meta.is_empty() {
        let _ = write!(out, "\n{}\n", meta.join("  \n"));
    }

    for block in &report.blocks {
        out.push('\n');
        match block {
            Block::Heading { text } => {
                let _ = writeln!(out, "## {text}");
            }
            Block::Subheading { text } => {
                let _ = writeln!(out, "### {text}");
            }
            Block::Text { text } => {
                let _ = writeln!(out, "{}", text.lines().collect::<Vec<_>>().join("  \n"));
            }
            Block::Table(table) => write_table(&mut out, table),
            Block::Chart(chart) => {
                let _ = writeln!(out, "**{}** ({})", chart.title(), chart_summary(chart));
            }
        }
    }
    out
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn write_table(out: &mut String, table: &TableBlock) {
    let header: Vec<String> = table.headers.iter().map(|h| escape_cell(h)).collect();
    let _ = writeln!(out, "| {} |", header.join(" | "));
    let _ = writeln!(out, "|{}", " --- |".repeat(table.headers.len()));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
}

/// One-line description of a chart's contents.
pub fn chart_summary(chart: &ChartDescriptor) -> String {
    match chart {
        ChartDescriptor::Scatter(scatter) => {
            let mut summary = format!("scatter, {} points", scatter.points.len());
            if let Some(fit) = &scatter.fit {
                let _ = write!(
                    summary,
                    ", fit y = {:.4} + {:.4}x",
                    fit.intercept, fit.slope
                );
            }
            summary
        }
        ChartDescriptor::Heatmap(heatmap) => {
            let total: u64 = heatmap.cells.iter().flatten().sum();
            format!(
                "heatmap, {} x {} table, {} observations",
                heatmap.rows.len(),
                heatmap.columns.len(),
                total
            )
        }
        ChartDescriptor::Histogram(histogram) => {
            let count: u64 = histogram.bins.iter().map(|bin| bin.count).sum();
            format!("histogram, {} bins, {} values", histogram.bins.len(), count)
        }
        ChartDescriptor::BoxPlot(plot) => format!(
            "box plot, median {:.2}, IQR {:.2} to {:.2}, {} outliers",
            plot.median,
            plot.q1,
            plot.q3,
            plot.outliers.len()
        ),
        ChartDescriptor::Bar(bar) => format!("bar chart, {} categories", bar.bars.len()),
    }
}
