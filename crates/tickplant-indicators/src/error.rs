//! Error types for indicator computation.

use thiserror::Error;

/// Errors that can occur while computing an indicator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// A window or period of zero was requested.
    #[error("window must be at least 1, got {0}")]
    InvalidWindow(usize),

    /// The smoothing constant is outside `(0, 1]`.
    #[error("alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),

    /// The series is too short for the requested lookback.
    #[error("need at least {needed} values, got {len}")]
    InsufficientData {
        /// Minimum length required.
        needed: usize,
        /// Actual length of the series.
        len: usize,
    },

    /// Rate of change against a zero base value.
    #[error("zero base value at index {index}")]
    ZeroBase {
        /// Index of the zero value in the input.
        index: usize,
    },

    /// The series has zero standard deviation.
    #[error("series has zero variance")]
    ZeroVariance,

    /// The series has equal minimum and maximum.
    #[error("series has zero range")]
    ZeroRange,

    /// A shift larger than the series.
    #[error("cannot shift {steps} steps in a series of length {len}")]
    InvalidShift {
        /// Requested shift.
        steps: usize,
        /// Length of the series.
        len: usize,
    },

    /// Values and mask have different lengths.
    #[error("values have length {values} but mask has length {mask}")]
    LengthMismatch {
        /// Length of the value series.
        values: usize,
        /// Length of the boolean mask.
        mask: usize,
    },
}

/// Result alias for indicator functions.
pub type Result<T> = std::result::Result<T, IndicatorError>;
