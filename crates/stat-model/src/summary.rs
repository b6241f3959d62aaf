use serde::{Deserialize, Serialize};

/// Number of frequency-table entries shown by default.
pub const FREQUENCY_DISPLAY_LIMIT: usize = 5;

/// Per-column summary: descriptive statistics for numeric columns, a
/// frequency table for categorical ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(DescriptiveStats),
    Categorical(FrequencyTable),
}

impl ColumnSummary {
    pub fn column(&self) -> &str {
        match self {
            ColumnSummary::Numeric(stats) => &stats.column,
            ColumnSummary::Categorical(table) => &table.column,
        }
    }
}

/// Descriptive statistics over the non-missing values of a numeric column.
///
/// `mode` is NaN when no value repeats (including the empty column) and
/// `std` is the sample standard deviation, NaN for fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

impl DescriptiveStats {
    /// Labelled values in display order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Mode", self.mode),
            ("Min", self.min),
            ("Max", self.max),
            ("Std", self.std),
        ]
    }

    /// One-line summary, e.g. `Mean: 2.40, Median: 2.00, ...`.
    pub fn summary_line(&self) -> String {
        self.entries()
            .iter()
            .map(|(label, value)| format!("{label}: {value:.2}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub category: String,
    pub count: u64,
}

/// Category counts sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub column: String,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// The `limit` most frequent categories.
    pub fn top(&self, limit: usize) -> &[FrequencyEntry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn count_of(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
    }
}
