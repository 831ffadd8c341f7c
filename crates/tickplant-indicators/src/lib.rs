//! Streaming technical indicators for tickplant.
//!
//! All functions take a numeric series, typically the close or VWAP column
//! pulled out of partitioned ticks with [`extract`], and return a new series.
//!
//! - Moving averages: [`sma`], [`ema`], [`cma`], [`dema`]
//! - Oscillators: [`rofc`], [`rsi`], [`dpo`]
//! - Transforms: [`zscore`], [`normalize`], [`lshift`], [`rshift`]
//! - Masks: [`argfind`], [`argcnt`], [`argtake`]
//!
//! # Example
//!
//! ```
//! use tickplant_indicators::{ema, rsi};
//!
//! let closes = [44.3, 44.1, 44.2, 43.6, 44.3, 44.8, 45.1];
//! let smoothed = ema(&closes, 0.2)?;
//! let strength = rsi(&closes, 3)?;
//!
//! assert_eq!(smoothed.len(), closes.len());
//! assert_eq!(strength[..3], [0.0, 0.0, 0.0]);
//! # Ok::<(), tickplant_indicators::IndicatorError>(())
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod moving;
mod oscillator;
mod select;
mod series;
mod transform;

pub use error::{IndicatorError, Result};
pub use moving::{cma, dema, ema, sma};
pub use oscillator::{RSI_CEILING, dpo, rofc, rsi};
pub use select::{argcnt, argfind, argtake};
pub use series::{PriceField, PriceFieldParseError, extract};
pub use transform::{lshift, normalize, rshift, zscore};
