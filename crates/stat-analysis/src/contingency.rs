//! Contingency tables and the chi-square test of independence.

use std::collections::BTreeMap;

use crate::distribution::chi_square_sf;
use crate::error::ComputationError;

/// Cross-tabulated counts; rows are X categories, columns Y categories,
/// both sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Cross-tabulates paired category labels.
    pub fn from_pairs(x: &[String], y: &[String]) -> Result<Self, ComputationError> {
        if x.len() != y.len() {
            return Err(ComputationError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ComputationError::InsufficientData {
                required: 1,
                found: 0,
            });
        }

        let mut cells: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        let mut row_index: BTreeMap<&str, usize> = BTreeMap::new();
        let mut column_index: BTreeMap<&str, usize> = BTreeMap::new();
        for (a, b) in x.iter().zip(y) {
            *cells.entry((a.as_str(), b.as_str())).or_default() += 1;
            row_index.insert(a.as_str(), 0);
            column_index.insert(b.as_str(), 0);
        }
        for (position, slot) in row_index.values_mut().enumerate() {
            *slot = position;
        }
        for (position, slot) in column_index.values_mut().enumerate() {
            *slot = position;
        }

        let mut counts = vec![vec![0u64; column_index.len()]; row_index.len()];
        for ((a, b), count) in cells {
            counts[row_index[a]][column_index[b]] = count;
        }
        Ok(Self {
            rows: row_index.keys().map(|key| (*key).to_string()).collect(),
            columns: column_index.keys().map(|key| (*key).to_string()).collect(),
            counts,
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.columns.len())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.rows.len().saturating_sub(1) * self.columns.len().saturating_sub(1)
    }

    /// Expected counts under independence: `row_total * column_total / total`.
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let total = self.total() as f64;
        let column_totals = self.column_totals();
        self.row_totals()
            .iter()
            .map(|&row_total| {
                column_totals
                    .iter()
                    .map(|&column_total| row_total as f64 * column_total as f64 / total)
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
    pub expected: Vec<Vec<f64>>,
}

/// Pearson's chi-square test of independence.
///
/// With one degree of freedom the Yates continuity correction moves each
/// observed count up to 0.5 towards its expected count. A table with a
/// single row or column has no degrees of freedom: statistic 0, p-value 1.
pub fn chi_square_test(table: &ContingencyTable) -> ChiSquareTest {
    let expected = table.expected();
    let degrees_of_freedom = table.degrees_of_freedom();
    if degrees_of_freedom == 0 {
        return ChiSquareTest {
            statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom,
            expected,
        };
    }

    let yates = degrees_of_freedom == 1;
    let mut statistic = 0.0;
    for (observed_row, expected_row) in table.counts.iter().zip(&expected) {
        for (&observed, &e) in observed_row.iter().zip(expected_row) {
            let mut o = observed as f64;
            if yates {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }
            statistic += (o - e) * (o - e) / e;
        }
    }

    ChiSquareTest {
        statistic,
        p_value: chi_square_sf(statistic, degrees_of_freedom),
        degrees_of_freedom,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    fn table(counts: Vec<Vec<u64>>) -> ContingencyTable {
        ContingencyTable {
            rows: (0..counts.len()).map(|i| format!("r{i}")).collect(),
            columns: (0..counts[0].len()).map(|j| format!("c{j}")).collect(),
            counts,
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_cross_tabulation_sorts_categories() {
        let x = labels(&["b", "a", "b", "a", "b"]);
        let y = labels(&["yes", "no", "no", "no", "yes"]);
        let table = ContingencyTable::from_pairs(&x, &y).unwrap();
        assert_eq!(table.rows, vec!["a", "b"]);
        assert_eq!(table.columns, vec!["no", "yes"]);
        assert_eq!(table.counts, vec![vec![2, 0], vec![1, 2]]);
        assert_eq!(table.row_totals(), vec![2, 3]);
        assert_eq!(table.column_totals(), vec![3, 2]);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_yates_correction_two_by_two() {
        let result = chi_square_test(&table(vec![vec![10, 20], vec![30, 40]]));
        assert_eq!(result.degrees_of_freedom, 1);
        assert_close(result.statistic, 0.446429, 1e-6);
        assert_close(result.p_value, 0.504036, 1e-6);
        assert_close(result.expected[0][0], 12.0, 1e-12);
    }

    #[test]
    fn test_correction_never_overshoots_expected() {
        // |o - e| = 1 for every cell, so each moves by exactly 0.5.
        let result = chi_square_test(&table(vec![vec![3, 1], vec![1, 3]]));
        assert_close(result.statistic, 0.5, 1e-12);
    }

    #[test]
    fn test_two_by_three() {
        let result = chi_square_test(&table(vec![vec![20, 5, 5], vec![5, 20, 5]]));
        assert_eq!(result.degrees_of_freedom, 2);
        assert_close(result.statistic, 18.0, 1e-12);
        assert_close(result.p_value, (-9.0f64).exp(), 1e-12);
    }

    #[test]
    fn test_single_row_has_no_degrees_of_freedom() {
        let result = chi_square_test(&table(vec![vec![4, 6]]));
        assert_eq!(result.degrees_of_freedom, 0);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_empty_pairs_rejected() {
        assert_eq!(
            ContingencyTable::from_pairs(&[], &[]),
            Err(ComputationError::InsufficientData {
                required: 1,
                found: 0
            })
        );
    }
}
