use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement kind of a dataset column.
///
/// A column is numeric when its declared storage type is an integer or
/// floating-point type. Everything else (strings, booleans, dates) is
/// categorical. Values are never coerced: a string column holding `"1"`,
/// `"2"` stays categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::Categorical => "Categorical",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The (X, Y) column pair selected for an association analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariablePair {
    pub x: String,
    pub y: String,
}

impl VariablePair {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Distinct column names in selection order (X first).
    pub fn distinct_columns(&self) -> Vec<&str> {
        if self.x == self.y {
            vec![self.x.as_str()]
        } else {
            vec![self.x.as_str(), self.y.as_str()]
        }
    }
}
