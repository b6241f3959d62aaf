//! Bivariate association analysis over Polars datasets.
//!
//! - **analyzer**: method selection and the [`analyze`] entry point
//! - **descriptive**: per-column summaries and their charts
//! - **normality**: Shapiro-Wilk test
//! - **correlation**: Pearson and Spearman coefficients
//! - **contingency**: cross-tabulation and the chi-square test
//! - **interpret**: significance threshold and plain-language labels
//! - **distribution**: special functions behind the p-values
//! - **data_utils**: column classification and complete-case extraction

pub mod analyzer;
pub mod contingency;
pub mod correlation;
pub mod data_utils;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod interpret;
pub mod normality;

pub use analyzer::{analyze, analyze_pair};
pub use contingency::{ChiSquareTest, ContingencyTable, chi_square_test};
pub use correlation::{Correlation, average_ranks, linear_fit, pearson, spearman};
pub use data_utils::{column_kind, complete_rows};
pub use descriptive::{describe, describe_charts, descriptive_stats, frequency_table};
pub use error::{AnalysisError, ComputationError, Result};
pub use interpret::{
    CorrelationInterpretation, Direction, MODERATE_CORRELATION_LIMIT,
    POSITIVE_DIRECTION_THRESHOLD, SIGNIFICANCE_LEVEL, Significance, Strength,
    WEAK_CORRELATION_LIMIT, interpret_correlation, is_normal,
};
pub use normality::{MIN_NORMALITY_SAMPLE, ShapiroWilk, check_normality, shapiro_wilk};
