//! Moving averages.

use crate::{IndicatorError, Result};

/// Simple moving average over `window` values.
///
/// Uses a running sum, so each step costs O(1). Until the window fills, the
/// mean is taken over the values seen so far: the first output is `x[0]`,
/// the second is the mean of `x[0..2]`, and so on.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `window` is zero.
///
/// # Example
///
/// ```
/// use tickplant_indicators::sma;
///
/// assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2).unwrap(), vec![1.0, 1.5, 2.5, 3.5]);
/// ```
pub fn sma(x: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow(window));
    }

    let mut out = Vec::with_capacity(x.len());
    let mut sum = 0.0;
    for (i, value) in x.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= x[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    Ok(out)
}

/// Exponential moving average with smoothing constant `alpha`.
///
/// `y[0] = x[0]` and `y[i] = alpha * x[i] + (1 - alpha) * y[i - 1]`. Smaller
/// values of `alpha` smooth more.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidAlpha`] unless `0 < alpha <= 1`.
pub fn ema(x: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(IndicatorError::InvalidAlpha(alpha));
    }

    let mut out = Vec::with_capacity(x.len());
    let mut prev = match x.first() {
        Some(&first) => first,
        None => return Ok(out),
    };
    out.push(prev);
    for value in &x[1..] {
        prev = alpha.mul_add(*value, (1.0 - alpha) * prev);
        out.push(prev);
    }
    Ok(out)
}

/// Change in the EMA of `x` over the last `delta` steps.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidAlpha`] for a bad `alpha`, or
/// [`IndicatorError::InsufficientData`] if `delta >= x.len()`.
pub fn dema(x: &[f64], alpha: f64, delta: usize) -> Result<f64> {
    let smoothed = ema(x, alpha)?;
    let len = smoothed.len();
    if delta >= len {
        return Err(IndicatorError::InsufficientData {
            needed: delta + 1,
            len,
        });
    }
    Ok(smoothed[len - 1] - smoothed[len - 1 - delta])
}

/// Cumulative moving average: the mean of every value up to each index.
#[must_use]
pub fn cma(x: &[f64]) -> Vec<f64> {
    let mut mean = 0.0;
    x.iter()
        .enumerate()
        .map(|(i, value)| {
            let seen = i as f64;
            mean = seen.mul_add(mean, *value) / (seen + 1.0);
            mean
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sma_ramp_up() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_abs_diff_eq!(out.as_slice(), [1.0, 1.5, 2.5, 3.5].as_slice(), epsilon = 1e-12);
    }

    #[test]
    fn test_sma_window_longer_than_series() {
        let out = sma(&[2.0, 4.0, 6.0], 10).unwrap();
        assert_abs_diff_eq!(out.as_slice(), [2.0, 3.0, 4.0].as_slice(), epsilon = 1e-12);
    }

    #[test]
    fn test_sma_window_one_is_identity() {
        let x = [3.0, -1.0, 7.5];
        assert_eq!(sma(&x, 1).unwrap(), x.to_vec());
    }

    #[test]
    fn test_sma_matches_naive_mean() {
        let x: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.37).sin() * 50.0 + 100.0).collect();
        let window = 7;
        let out = sma(&x, window).unwrap();

        for i in window - 1..x.len() {
            let naive = x[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert_abs_diff_eq!(out[i], naive, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sma_errors_and_empty() {
        assert_eq!(sma(&[1.0], 0), Err(IndicatorError::InvalidWindow(0)));
        assert!(sma(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_ema_recurrence() {
        let out = ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.0 / 3.0).unwrap();
        assert_abs_diff_eq!(
            out.as_slice(),
            [1.0, 1.3333, 1.8889, 2.5926, 3.3951].as_slice(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_ema_alpha_one_is_identity() {
        let x = [5.0, 1.0, 3.0];
        assert_eq!(ema(&x, 1.0).unwrap(), x.to_vec());
    }

    #[test]
    fn test_ema_rejects_bad_alpha() {
        assert!(matches!(ema(&[1.0], 0.0), Err(IndicatorError::InvalidAlpha(_))));
        assert!(matches!(ema(&[1.0], 1.5), Err(IndicatorError::InvalidAlpha(_))));
        assert!(matches!(ema(&[1.0], f64::NAN), Err(IndicatorError::InvalidAlpha(_))));
        assert!(ema(&[], 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_dema() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let change = dema(&x, 1.0 / 3.0, 2).unwrap();
        assert_abs_diff_eq!(change, 3.395_061_7 - 1.888_888_9, epsilon = 1e-6);

        assert_abs_diff_eq!(dema(&x, 0.5, 0).unwrap(), 0.0);
        assert_eq!(
            dema(&x, 0.5, 5),
            Err(IndicatorError::InsufficientData { needed: 6, len: 5 })
        );
    }

    #[test]
    fn test_cma() {
        let out = cma(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_abs_diff_eq!(
            out.as_slice(),
            [10.0, 15.0, 20.0, 25.0, 30.0].as_slice(),
            epsilon = 1e-12
        );
        assert!(cma(&[]).is_empty());
    }
}
