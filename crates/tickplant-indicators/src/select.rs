//! Boolean mask helpers for picking out signal positions.

use crate::{IndicatorError, Result};

/// Indices where `mask` is true.
#[must_use]
pub fn argfind(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &hit)| hit.then_some(i))
        .collect()
}

/// Number of true entries in `mask`.
#[must_use]
pub fn argcnt(mask: &[bool]) -> usize {
    mask.iter().filter(|&&hit| hit).count()
}

/// Values of `x` at the positions where `mask` is true.
///
/// # Errors
///
/// Returns [`IndicatorError::LengthMismatch`] if `x` and `mask` differ in
/// length.
pub fn argtake(x: &[f64], mask: &[bool]) -> Result<Vec<f64>> {
    if x.len() != mask.len() {
        return Err(IndicatorError::LengthMismatch {
            values: x.len(),
            mask: mask.len(),
        });
    }
    Ok(x.iter()
        .zip(mask)
        .filter_map(|(&v, &hit)| hit.then_some(v))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_helpers() {
        let x = [1.0, -2.0, 3.0, -4.0, 5.0];
        let mask: Vec<bool> = x.iter().map(|v| *v > 0.0).collect();

        assert_eq!(argfind(&mask), vec![0, 2, 4]);
        assert_eq!(argcnt(&mask), 3);
        assert_eq!(argtake(&x, &mask).unwrap(), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_argtake_length_mismatch() {
        assert_eq!(
            argtake(&[1.0, 2.0], &[true]),
            Err(IndicatorError::LengthMismatch { values: 2, mask: 1 })
        );
    }
}
