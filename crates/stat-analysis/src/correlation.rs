//! Pearson and Spearman correlation with two-sided p-values.

use stat_model::RegressionLine;

use crate::distribution::correlation_p_value;
use crate::error::ComputationError;

/// Coefficient and two-sided p-value over `sample_size` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
    pub sample_size: usize,
}

struct Moments {
    x_mean: f64,
    y_mean: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn moments(x: &[f64], y: &[f64]) -> Result<Moments, ComputationError> {
    if x.len() != y.len() {
        return Err(ComputationError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(ComputationError::InsufficientData {
            required: 2,
            found: x.len(),
        });
    }
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    Ok(Moments {
        x_mean,
        y_mean,
        sxx,
        syy,
        sxy,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Pearson product-moment correlation.
///
/// Fails with [`ComputationError::ConstantInput`] when either sample has
/// zero variance. Two pairs always correlate perfectly, with p = 1.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, ComputationError> {
    let m = moments(x, y)?;
    if is_constant(x) || is_constant(y) {
        return Err(ComputationError::ConstantInput);
    }
    let coefficient = (m.sxy / (m.sxx * m.syy).sqrt()).clamp(-1.0, 1.0);
    Ok(Correlation {
        coefficient,
        p_value: correlation_p_value(coefficient, x.len()),
        sample_size: x.len(),
    })
}

/// Spearman rank correlation: Pearson over average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation, ComputationError> {
    if x.len() != y.len() {
        return Err(ComputationError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

/// Least-squares line of `y` on `x`.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<RegressionLine, ComputationError> {
    let m = moments(x, y)?;
    if is_constant(x) {
        return Err(ComputationError::ConstantInput);
    }
    let slope = m.sxy / m.sxx;
    Ok(RegressionLine {
        slope,
        intercept: m.y_mean - slope * m.x_mean,
    })
}
