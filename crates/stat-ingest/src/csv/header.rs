//! CSV header parsing.

use std::collections::BTreeSet;

/// Column names read from the header row(s) of a CSV file.
#[derive(Debug, Clone)]
pub struct CsvHeaders {
    /// Trimmed column names.
    pub columns: Vec<String>,
    /// Descriptive labels, present when the file has a label row above the names.
    pub labels: Option<Vec<String>>,
    /// Rows preceding the data (1 for names only, 2 for labels + names).
    pub skip_rows: usize,
}

impl CsvHeaders {
    pub fn single(columns: Vec<String>) -> Self {
        Self {
            columns,
            labels: None,
            skip_rows: 1,
        }
    }

    pub fn with_labels(labels: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            columns,
            labels: Some(labels),
            skip_rows: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Descriptive label for `column`, if the file carried one.
    pub fn label_for(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(idx))
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// First column name that appears more than once.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.columns
            .iter()
            .find(|column| !seen.insert(column.as_str()))
            .map(String::as_str)
    }
}

/// Trims whitespace and a leading byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Splits one CSV line into normalized fields. Quoted fields may contain
/// commas, and `""` inside quotes is an escaped quote.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', false) => in_quotes = true,
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            (',', false) => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_header_has_no_labels() {
        let headers = CsvHeaders::single(vec!["age".to_string(), "income".to_string()]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.skip_rows, 1);
        assert_eq!(headers.label_for("age"), None);
    }

    #[test]
    fn test_labelled_header() {
        let headers = CsvHeaders::with_labels(
            vec!["Age in years".to_string(), String::new()],
            vec!["age".to_string(), "income".to_string()],
        );
        assert_eq!(headers.skip_rows, 2);
        assert_eq!(headers.label_for("age"), Some("Age in years"));
        assert_eq!(headers.label_for("income"), None);
        assert_eq!(headers.label_for("missing"), None);
    }

    #[test]
    fn test_first_duplicate() {
        let headers = CsvHeaders::single(vec![
            "q1".to_string(),
            "q2".to_string(),
            "q1".to_string(),
        ]);
        assert_eq!(headers.first_duplicate(), Some("q1"));
        let unique = CsvHeaders::single(vec!["q1".to_string(), "q2".to_string()]);
        assert_eq!(unique.first_duplicate(), None);
    }

    #[test]
    fn test_normalize_header_strips_bom() {
        assert_eq!(normalize_header("\u{feff}score "), "score");
        assert_eq!(normalize_header("  gender"), "gender");
    }

    #[test]
    fn test_parse_csv_line_quoted_and_escaped() {
        assert_eq!(parse_csv_line("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(
            parse_csv_line("\"City, Country\",\"say \"\"hi\"\"\""),
            vec!["City, Country", "say \"hi\""]
        );
    }
}
