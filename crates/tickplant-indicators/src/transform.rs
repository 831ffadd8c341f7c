//! Whole-series transforms and fixed-length shifts.

use crate::{IndicatorError, Result};

/// Standard scores `(x - mean) / stdev` using the population deviation.
///
/// # Errors
///
/// Returns [`IndicatorError::ZeroVariance`] if every value is equal.
pub fn zscore(x: &[f64]) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Ok(Vec::new());
    }

    let len = x.len() as f64;
    let mean = x.iter().sum::<f64>() / len;
    let variance = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
    let stdev = variance.sqrt();
    if stdev == 0.0 {
        return Err(IndicatorError::ZeroVariance);
    }

    Ok(x.iter().map(|v| (v - mean) / stdev).collect())
}

/// Maps `x` affinely onto `[-1, 1]`: the minimum goes to `-1`, the maximum
/// to `1`.
///
/// # Errors
///
/// Returns [`IndicatorError::ZeroRange`] if the minimum equals the maximum.
pub fn normalize(x: &[f64]) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Ok(Vec::new());
    }

    let (min, max) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = max - min;
    if range == 0.0 {
        return Err(IndicatorError::ZeroRange);
    }

    Ok(x.iter().map(|v| 2.0 * (v - min) / range - 1.0).collect())
}

/// Shifts `x` left by `steps`, repeating the last value at the end.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidShift`] if `steps > x.len()`.
pub fn lshift(x: &[f64], steps: usize) -> Result<Vec<f64>> {
    check_shift(x, steps)?;
    let Some(&last) = x.last() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(x.len());
    out.extend_from_slice(&x[steps..]);
    out.resize(x.len(), last);
    Ok(out)
}

/// Shifts `x` right by `steps`, filling the start with `fill` or, when
/// `fill` is `None`, with the first value.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidShift`] if `steps > x.len()`.
pub fn rshift(x: &[f64], steps: usize, fill: Option<f64>) -> Result<Vec<f64>> {
    check_shift(x, steps)?;
    let Some(&first) = x.first() else {
        return Ok(Vec::new());
    };

    let mut out = vec![fill.unwrap_or(first); steps];
    out.extend_from_slice(&x[..x.len() - steps]);
    Ok(out)
}

const fn check_shift(x: &[f64], steps: usize) -> Result<()> {
    if steps > x.len() {
        return Err(IndicatorError::InvalidShift {
            steps,
            len: x.len(),
        });
    }
    Ok(())
}
