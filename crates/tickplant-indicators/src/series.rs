//! Column extraction from tick series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tickplant_types::Tick;

/// A numeric column of a [`Tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Opening price.
    Open,
    /// High price.
    High,
    /// Low price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Volume-weighted average price.
    Vwap,
    /// Traded volume.
    Volume,
    /// Number of trades.
    TradeCount,
}

impl PriceField {
    /// Returns the column value of `tick`.
    #[must_use]
    pub fn value(&self, tick: &Tick) -> f64 {
        match self {
            Self::Open => tick.open,
            Self::High => tick.high,
            Self::Low => tick.low,
            Self::Close => tick.close,
            Self::Vwap => tick.vwap,
            Self::Volume => tick.volume as f64,
            Self::TradeCount => tick.trade_count as f64,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Vwap => "vwap",
            Self::Volume => "volume",
            Self::TradeCount => "trade_count",
        }
    }

    /// Returns all fields.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Vwap,
            Self::Volume,
            Self::TradeCount,
        ]
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = PriceFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" | "o" => Ok(Self::Open),
            "high" | "h" => Ok(Self::High),
            "low" | "l" => Ok(Self::Low),
            "close" | "c" => Ok(Self::Close),
            "vwap" => Ok(Self::Vwap),
            "volume" | "v" => Ok(Self::Volume),
            "trade_count" | "count" | "trades" => Ok(Self::TradeCount),
            _ => Err(PriceFieldParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown price field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFieldParseError(String);

impl fmt::Display for PriceFieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid price field '{}', expected one of: open, high, low, close, vwap, volume, trade_count",
            self.0
        )
    }
}

impl std::error::Error for PriceFieldParseError {}

/// Extracts one column of `ticks` as a numeric series.
#[must_use]
pub fn extract(ticks: &[Tick], field: PriceField) -> Vec<f64> {
    ticks.iter().map(|t| field.value(t)).collect()
}
