//! Error types for analysis.

use thiserror::Error;

/// A numeric routine could not produce a defined result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    /// Every value is the same, so variance-based statistics are undefined.
    #[error("all values are identical")]
    ConstantInput,

    /// Too few observations for the statistic.
    #[error("needs at least {required} values, found {found}")]
    InsufficientData { required: usize, found: usize },

    /// Paired samples differ in length.
    #[error("paired samples differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
}

/// Errors returned by [`analyze`](crate::analyze) and [`describe`](crate::describe).
///
/// Empty data and mixed column kinds are not errors; they are reported inside
/// the [`AnalysisResult`](stat_model::AnalysisResult).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Selected column does not exist.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Degenerate input for a statistical routine.
    #[error("{context}: {source}")]
    Computation {
        context: String,
        #[source]
        source: ComputationError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl AnalysisError {
    pub(crate) fn computation(context: impl Into<String>, source: ComputationError) -> Self {
        Self::Computation {
            context: context.into(),
            source,
        }
    }
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computation_error_reads_as_one_line() {
        let err = AnalysisError::computation(
            "Pearson correlation of 'age' and 'score'",
            ComputationError::ConstantInput,
        );
        assert_eq!(
            err.to_string(),
            "Pearson correlation of 'age' and 'score': all values are identical"
        );
    }
}
