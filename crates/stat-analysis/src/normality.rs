//! Shapiro-Wilk test for normality.
//!
//! Coefficients and the p-value come from Royston's approximation (AS R94),
//! valid for 3 to 5000 observations. Larger samples are still tested but
//! the p-value may be inaccurate.

use stat_model::NormalityCheck;
use tracing::warn;

use crate::distribution::{normal_quantile, normal_sf};
use crate::error::ComputationError;
use crate::interpret::is_normal;

/// Smallest sample the test runs on.
pub const MIN_NORMALITY_SAMPLE: usize = 3;

/// Largest sample the p-value approximation is calibrated for.
pub const MAX_NORMALITY_SAMPLE: usize = 5000;

const SMALL_RANGE: f64 = 1e-19;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// W statistic and p-value of one Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub statistic: f64,
    pub p_value: f64,
}

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Half of the antisymmetric coefficient vector, largest weight first.
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![0.5f64.sqrt()];
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal_quantile((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; half];
    a[0] = a1;
    let (fac, first_scaled) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (fac, 2)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (fac, 1)
    };
    for (weight, quantile) in a.iter_mut().zip(&m).skip(first_scaled) {
        *weight = -quantile / fac;
    }
    a
}

fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        let p = 6.0 / std::f64::consts::PI * (w.sqrt().asin() - std::f64::consts::FRAC_PI_3);
        return p.max(0.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (mean, sd) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let log_n = an.ln();
        (poly(&C5, log_n), poly(&C6, log_n).exp())
    };
    normal_sf((y - mean) / sd)
}

/// Runs the Shapiro-Wilk test on `values` (any order).
pub fn shapiro_wilk(values: &[f64]) -> Result<ShapiroWilk, ComputationError> {
    let n = values.len();
    if n < MIN_NORMALITY_SAMPLE {
        return Err(ComputationError::InsufficientData {
            required: MIN_NORMALITY_SAMPLE,
            found: n,
        });
    }
    if n > MAX_NORMALITY_SAMPLE {
        warn!(
            n,
            "Shapiro-Wilk p-value may be inaccurate above {MAX_NORMALITY_SAMPLE} observations"
        );
    }

    let mut x = values.to_vec();
    x.sort_by(f64::total_cmp);
    let range = x[n - 1] - x[0];
    if range < SMALL_RANGE {
        return Err(ComputationError::ConstantInput);
    }

    let half_weights = coefficients(n);
    let mut weights = vec![0.0; n];
    for (i, a) in half_weights.iter().enumerate() {
        weights[i] = -a;
        weights[n - 1 - i] = *a;
    }

    // W is the squared correlation between the weights and the ordered sample.
    let nf = n as f64;
    let scaled: Vec<f64> = x.iter().map(|v| v / range).collect();
    let x_mean = scaled.iter().sum::<f64>() / nf;
    let w_mean = weights.iter().sum::<f64>() / nf;
    let (mut sax, mut ssa, mut ssx) = (0.0, 0.0, 0.0);
    for (a, xi) in weights.iter().zip(&scaled) {
        let da = a - w_mean;
        let dx = xi - x_mean;
        sax += da * dx;
        ssa += da * da;
        ssx += dx * dx;
    }
    let statistic = (sax * sax / (ssa * ssx)).min(1.0);

    Ok(ShapiroWilk {
        statistic,
        p_value: p_value(statistic, n),
    })
}

/// Normality verdict for one variable.
///
/// Samples smaller than [`MIN_NORMALITY_SAMPLE`] are non-normal without
/// running the test, with statistic and p-value reported as 0.
pub fn check_normality(values: &[f64]) -> Result<NormalityCheck, ComputationError> {
    if values.len() < MIN_NORMALITY_SAMPLE {
        return Ok(NormalityCheck::untested());
    }
    let test = shapiro_wilk(values)?;
    Ok(NormalityCheck {
        statistic: test.statistic,
        p_value: test.p_value,
        is_normal: is_normal(test.p_value),
        tested: true,
    })
}
