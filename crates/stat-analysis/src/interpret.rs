//! Plain-language labels for test results.

use std::fmt;

/// Significance threshold shared by every test. Not configurable.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// `|r|` below this is a weak correlation.
pub const WEAK_CORRELATION_LIMIT: f64 = 0.3;

/// `|r|` below this (and at least [`WEAK_CORRELATION_LIMIT`]) is moderate.
pub const MODERATE_CORRELATION_LIMIT: f64 = 0.7;

/// Coefficients strictly above this are positive; `r == 0` reads as negative.
pub const POSITIVE_DIRECTION_THRESHOLD: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude < WEAK_CORRELATION_LIMIT {
            Strength::Weak
        } else if magnitude < MODERATE_CORRELATION_LIMIT {
            Strength::Moderate
        } else {
            Strength::Strong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn from_coefficient(r: f64) -> Self {
        if r > POSITIVE_DIRECTION_THRESHOLD {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Positive => "Positive",
            Direction::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    Significant,
    NotSignificant,
}

impl Significance {
    pub fn from_p_value(p: f64) -> Self {
        if p < SIGNIFICANCE_LEVEL {
            Significance::Significant
        } else {
            Significance::NotSignificant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Significance::Significant => "Significant",
            Significance::NotSignificant => "Not Significant",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reading of a correlation coefficient and its p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationInterpretation {
    pub strength: Strength,
    pub direction: Direction,
    pub significance: Significance,
}

impl fmt::Display for CorrelationInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.strength.as_str(),
            self.direction.as_str(),
            self.significance.as_str()
        )
    }
}

pub fn interpret_correlation(r: f64, p: f64) -> CorrelationInterpretation {
    CorrelationInterpretation {
        strength: Strength::from_coefficient(r),
        direction: Direction::from_coefficient(r),
        significance: Significance::from_p_value(p),
    }
}

/// A sample counts as normal when the normality test's p-value exceeds the
/// significance level.
pub fn is_normal(p_value: f64) -> bool {
    p_value > SIGNIFICANCE_LEVEL
}
