//! Momentum oscillators: rate of change, RSI and the detrended price oscillator.

use crate::{IndicatorError, Result, sma};

/// RSI reported when the average loss is zero.
pub const RSI_CEILING: f64 = 100.0;

/// Percentage rate of change over `n` steps.
///
/// `out[i] = 100 * (x[i] - x[i - n]) / x[i - n]` for `i >= n`. The first `n`
/// entries are `0.0`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `n` is zero, or
/// [`IndicatorError::ZeroBase`] if a base value `x[i - n]` is zero.
pub fn rofc(x: &[f64], n: usize) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(IndicatorError::InvalidWindow(n));
    }

    let mut out = vec![0.0; x.len()];
    for i in n..x.len() {
        let base = x[i - n];
        if base == 0.0 {
            return Err(IndicatorError::ZeroBase { index: i - n });
        }
        out[i] = 100.0 * (x[i] - base) / base;
    }
    Ok(out)
}

/// Wilder relative strength index over `n` periods.
///
/// The first `n` entries are `0.0`. At index `n` the average gain and loss
/// are the simple means of the first `n` differences; after that each is
/// smoothed as `avg = (avg * (n - 1) + value) / n`. When the average loss is
/// zero the value is [`RSI_CEILING`], so a constant series reads `100.0`.
///
/// A series of `n` values or fewer yields all zeros.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `n` is zero.
pub fn rsi(x: &[f64], n: usize) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(IndicatorError::InvalidWindow(n));
    }

    let mut out = vec![0.0; x.len()];
    if x.len() <= n {
        return Ok(out);
    }

    let periods = n as f64;
    let (gain, loss) = x[..=n]
        .windows(2)
        .map(|w| split_move(w[1] - w[0]))
        .fold((0.0, 0.0), |(g, l), (up, down)| (g + up, l + down));
    let mut avg_gain = gain / periods;
    let mut avg_loss = loss / periods;
    out[n] = strength_index(avg_gain, avg_loss);

    for i in n + 1..x.len() {
        let (up, down) = split_move(x[i] - x[i - 1]);
        avg_gain = avg_gain.mul_add(periods - 1.0, up) / periods;
        avg_loss = avg_loss.mul_add(periods - 1.0, down) / periods;
        out[i] = strength_index(avg_gain, avg_loss);
    }
    Ok(out)
}

/// Splits a price change into `(gain, loss)` magnitudes.
fn split_move(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        RSI_CEILING
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Detrended price oscillator over `n` periods.
///
/// The price shifted back by `n / 2 + 1` steps minus the `n`-period SMA:
/// `out[i] = x[i - (n / 2 + 1)] - sma(x, n)[i]`. Entries before both the SMA
/// window is full and the shifted index exists are `0.0`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `n` is zero.
pub fn dpo(x: &[f64], n: usize) -> Result<Vec<f64>> {
    let average = sma(x, n)?;
    let shift = n / 2 + 1;
    let warm_up = (n - 1).max(shift);

    let mut out = vec![0.0; x.len()];
    for i in warm_up..x.len() {
        out[i] = x[i - shift] - average[i];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rofc() {
        let out = rofc(&[10.0, 11.0, 12.1, 6.05], 1).unwrap();
        assert_abs_diff_eq!(
            out.as_slice(),
            [0.0, 10.0, 10.0, -50.0].as_slice(),
            epsilon = 1e-9
        );

        let out = rofc(&[10.0, 20.0, 15.0], 2).unwrap();
        assert_abs_diff_eq!(out.as_slice(), [0.0, 0.0, 50.0].as_slice(), epsilon = 1e-9);
    }

    #[test]
    fn test_rofc_errors() {
        assert_eq!(rofc(&[1.0, 2.0], 0), Err(IndicatorError::InvalidWindow(0)));
        assert_eq!(
            rofc(&[1.0, 0.0, 2.0, 3.0], 1),
            Err(IndicatorError::ZeroBase { index: 1 })
        );
        assert_eq!(rofc(&[1.0, 2.0], 5).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let out = rsi(&[1.0, 2.0, 1.0, 2.0, 3.0], 2).unwrap();
        assert_abs_diff_eq!(
            out.as_slice(),
            [0.0, 0.0, 50.0, 75.0, 87.5].as_slice(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rsi_constant_series_hits_ceiling() {
        let out = rsi(&[42.0; 10], 3).unwrap();

        assert_eq!(out.len(), 10);
        assert!(out[..3].iter().all(|v| *v == 0.0));
        assert!(out[3..].iter().all(|v| *v == RSI_CEILING));
    }

    #[test]
    fn test_rsi_falling_series_reaches_zero() {
        let out = rsi(&[5.0, 4.0, 3.0, 2.0, 1.0], 2).unwrap();
        assert_abs_diff_eq!(out[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[4], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_short_series_and_errors() {
        assert_eq!(rsi(&[1.0, 2.0], 2).unwrap(), vec![0.0, 0.0]);
        assert!(rsi(&[], 14).unwrap().is_empty());
        assert_eq!(rsi(&[1.0], 0), Err(IndicatorError::InvalidWindow(0)));
    }

    #[test]
    fn test_dpo() {
        let out = dpo(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 4).unwrap();
        assert_abs_diff_eq!(
            out.as_slice(),
            [0.0, 0.0, 0.0, -1.5, -1.5, -1.5].as_slice(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_dpo_short_window_waits_for_shift() {
        // n = 1: the SMA is the series itself and the shift is one step.
        let out = dpo(&[1.0, 3.0, 6.0], 1).unwrap();
        assert_abs_diff_eq!(out.as_slice(), [0.0, -2.0, -3.0].as_slice(), epsilon = 1e-12);
    }

    #[test]
    fn test_dpo_errors_and_empty() {
        assert_eq!(dpo(&[1.0], 0), Err(IndicatorError::InvalidWindow(0)));
        assert!(dpo(&[], 5).unwrap().is_empty());
        assert_eq!(dpo(&[1.0, 2.0], 5).unwrap(), vec![0.0, 0.0]);
    }
}
