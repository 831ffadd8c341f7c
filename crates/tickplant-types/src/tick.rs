//! Tick data representation and the `.tks` line format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TickParseError;

/// A single OHLCV + VWAP bar with a UTC epoch timestamp.
///
/// One tick is stored per line as nine whitespace separated fields:
///
/// ```text
/// timestamp open high low close volume trade_count vwap gap_flag
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// UTC epoch seconds (fractional allowed).
    pub timestamp: f64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Number of trades in the bar.
    pub trade_count: u64,
    /// Volume weighted average price.
    pub vwap: f64,
    /// True when the bar was built across a gap in the feed.
    pub gap_flag: bool,
}

impl Tick {
    /// Number of fields in one serialized tick line.
    pub const FIELDS: usize = 9;

    /// Names of the serialized fields, in column order.
    pub const FIELD_NAMES: [&'static str; Self::FIELDS] = [
        "timestamp",
        "open",
        "high",
        "low",
        "close",
        "volume",
        "trade_count",
        "vwap",
        "gap_flag",
    ];

    /// Creates a new tick.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        timestamp: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        trade_count: u64,
        vwap: f64,
        gap_flag: bool,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            trade_count,
            vwap,
            gap_flag,
        }
    }

    /// Returns the timestamp as a UTC date-time, or `None` if it is not
    /// finite or out of range.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        if !self.timestamp.is_finite() {
            return None;
        }
        let secs = self.timestamp.floor();
        let nanos = ((self.timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// Returns the UTC calendar date the tick falls on.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date_naive())
    }

    /// Parses one line of the tick file format.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not hold exactly [`Tick::FIELDS`]
    /// fields or one of them is not a valid number.
    pub fn parse_line(line: &str) -> Result<Self, TickParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != Self::FIELDS {
            return Err(TickParseError::FieldCount {
                expected: Self::FIELDS,
                found: fields.len(),
            });
        }

        let timestamp = parse_float(0, fields[0])?;
        if !timestamp.is_finite() {
            return Err(TickParseError::NonFiniteTimestamp(fields[0].to_string()));
        }

        Ok(Self {
            timestamp,
            open: parse_float(1, fields[1])?,
            high: parse_float(2, fields[2])?,
            low: parse_float(3, fields[3])?,
            close: parse_float(4, fields[4])?,
            volume: parse_count(5, fields[5])?,
            trade_count: parse_count(6, fields[6])?,
            vwap: parse_float(7, fields[7])?,
            gap_flag: parse_flag(8, fields[8])?,
        })
    }
}

impl Tick {
    /// Number of fields in the legacy line layout.
    pub const LEGACY_FIELDS: usize = 10;

    /// Parses one line of the legacy layout
    /// `YYYY-MM-DD HH:MM:SS open high low close volume vwap gaps count`.
    ///
    /// The date and time are read as UTC. The result is in the current
    /// column order, so its [`Display`](fmt::Display) output is a valid
    /// `.tks` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not hold [`Tick::LEGACY_FIELDS`]
    /// fields, the date and time do not parse, or a numeric field is invalid.
    pub fn parse_legacy_line(line: &str) -> Result<Self, TickParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != Self::LEGACY_FIELDS {
            return Err(TickParseError::FieldCount {
                expected: Self::LEGACY_FIELDS,
                found: fields.len(),
            });
        }

        let stamp = format!("{} {}", fields[0], fields[1]);
        let datetime = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S")
            .map_err(|_| TickParseError::LegacyTimestamp(stamp.clone()))?;

        Ok(Self {
            timestamp: datetime.and_utc().timestamp() as f64,
            open: parse_float(1, fields[2])?,
            high: parse_float(2, fields[3])?,
            low: parse_float(3, fields[4])?,
            close: parse_float(4, fields[5])?,
            volume: parse_count(5, fields[6])?,
            vwap: parse_float(7, fields[7])?,
            gap_flag: parse_flag(8, fields[8])?,
            trade_count: parse_count(6, fields[9])?,
        })
    }
}

impl FromStr for Tick {
    type Err = TickParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

/// Writes the tick as one line (without the trailing newline).
impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            Decimal(self.timestamp),
            Decimal(self.open),
            Decimal(self.high),
            Decimal(self.low),
            Decimal(self.close),
            self.volume,
            self.trade_count,
            Decimal(self.vwap),
            u8::from(self.gap_flag)
        )
    }
}

/// Shortest round-trip float rendering that always carries a decimal point.
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        if self.0.is_finite() && !text.contains(['.', 'e', 'E']) {
            write!(f, "{text}.0")
        } else {
            f.write_str(&text)
        }
    }
}

fn parse_float(index: usize, value: &str) -> Result<f64, TickParseError> {
    value
        .parse::<f64>()
        .map_err(|_| TickParseError::invalid(index, value))
}

/// Integer fields written by numeric tooling often come out as `3.0` or `3e0`.
fn parse_count(index: usize, value: &str) -> Result<u64, TickParseError> {
    if let Ok(n) = value.parse::<u64>() {
        return Ok(n);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(TickParseError::invalid(index, value)),
    }
}

fn parse_flag(index: usize, value: &str) -> Result<bool, TickParseError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => match parse_count(index, other)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(TickParseError::invalid(index, value)),
        },
    }
}
