use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use stat_ingest::format_numeric;
use stat_model::{
    ChartDescriptor, ChiSquareStatistic, ColumnKind, ColumnSummary, DescriptiveStats, ERROR_METRIC,
    FREQUENCY_DISPLAY_LIMIT, FrequencyTable, Statistic,
};
use stat_report::chart_summary;

use crate::types::{AnalyzeResult, ColumnsResult, DescribeResult};

pub fn print_columns(result: &ColumnsResult) {
    println!("File: {}", result.source.display());
    println!("Rows: {}", result.rows);
    let has_labels = result.labels.iter().any(Option::is_some);

    let mut table = Table::new();
    let mut header = vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Kind"),
        header_cell("Non-missing"),
    ];
    if has_labels {
        header.push(header_cell("Label"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    for (info, label) in result.columns.iter().zip(&result.labels) {
        let kind = if info.is_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        };
        let mut row = vec![
            Cell::new(&info.name).add_attribute(Attribute::Bold),
            dim_cell(&info.dtype),
            kind_cell(kind),
            missing_aware_count(info.non_missing, result.rows),
        ];
        if has_labels {
            row.push(match label {
                Some(text) => Cell::new(text),
                None => dim_cell("-"),
            });
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_descriptive(result: &DescribeResult) {
    for (idx, summary) in result.summaries.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        print_column_summary(summary);
    }
}

pub fn print_analysis(result: &AnalyzeResult) {
    let findings = &result.findings;
    println!("File: {}", result.source.display());
    println!("Rows: {}", result.rows);
    println!("Variables: {} vs {}", findings.pair.x, findings.pair.y);

    println!();
    println!("Descriptive Statistics");
    for section in &findings.columns {
        println!();
        print_column_summary(&section.summary);
        for chart in &section.charts {
            print_chart_line(chart);
        }
    }

    let analysis = &findings.analysis;
    println!();
    println!("Association Analysis");
    println!("Method: {}", analysis.method);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    for metric in &analysis.metrics {
        let value = if metric.name == ERROR_METRIC {
            Cell::new(&metric.value).fg(Color::Red)
        } else {
            Cell::new(&metric.value)
        };
        table.add_row(vec![Cell::new(&metric.name), value]);
    }
    println!("{table}");

    if let Some(Statistic::ChiSquare(statistic)) = &analysis.statistic {
        print_contingency(statistic);
    }
    if let Some(chart) = &analysis.chart {
        print_chart_line(chart);
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
}

fn print_chart_line(chart: &ChartDescriptor) {
    println!(
        "  [{}] {}: {}",
        chart.kind_name(),
        chart.title(),
        chart_summary(chart)
    );
}

fn print_column_summary(summary: &ColumnSummary) {
    println!("Variable: {}", summary.column());
    let table = match summary {
        ColumnSummary::Numeric(stats) => numeric_table(stats),
        ColumnSummary::Categorical(frequencies) => frequency_table(frequencies),
    };
    println!("{table}");
}

fn numeric_table(stats: &DescriptiveStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("N"), Cell::new(stats.count)]);
    for (label, value) in stats.entries() {
        let cell = if value.is_nan() {
            dim_cell("-")
        } else {
            Cell::new(format!("{value:.2}"))
        };
        table.add_row(vec![Cell::new(label), cell]);
    }
    table
}

fn frequency_table(frequencies: &FrequencyTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Frequency")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let shown = frequencies.top(FREQUENCY_DISPLAY_LIMIT);
    for entry in shown {
        table.add_row(vec![Cell::new(&entry.category), Cell::new(entry.count)]);
    }
    let hidden = frequencies.entries.len() - shown.len();
    if hidden > 0 {
        table.add_row(vec![
            dim_cell(format!("({hidden} more)")),
            dim_cell(
                frequencies.entries[shown.len()..]
                    .iter()
                    .map(|entry| entry.count)
                    .sum::<u64>(),
            ),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(frequencies.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_contingency(statistic: &ChiSquareStatistic) {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(statistic.columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_grid_style(&mut table);
    for (row_idx, label) in statistic.rows.iter().enumerate() {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        for (col_idx, observed) in statistic.observed[row_idx].iter().enumerate() {
            let expected = format_numeric(statistic.expected[row_idx][col_idx]);
            row.push(Cell::new(format!("{observed} ({expected})")));
        }
        table.add_row(row);
    }
    println!("Observed (expected) counts:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_grid_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Numeric => Cell::new(kind).fg(Color::Blue),
        ColumnKind::Categorical => Cell::new(kind).fg(Color::Magenta),
    }
}

fn missing_aware_count(non_missing: usize, rows: usize) -> Cell {
    if non_missing < rows {
        Cell::new(non_missing).fg(Color::Yellow)
    } else {
        Cell::new(non_missing)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
