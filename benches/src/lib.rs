//! Benchmark fixtures for tickplant.
//!
//! Generates deterministic synthetic tick series so partitioning and
//! indicator benchmarks run without external data.

use chrono::NaiveDate;
use tickplant_lib::{AssetGroup, DateRange, KeyError, PartitionKey, Source, Tick, start_of_day};

/// Shape of a synthetic series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesConfig {
    /// First calendar day of the series.
    pub start: NaiveDate,
    /// Number of consecutive calendar days.
    pub days: u32,
    /// Ticks per day, spread evenly over the day.
    pub ticks_per_day: u32,
}

impl SeriesConfig {
    /// Creates a config starting on 2011-11-28 (a Monday).
    #[must_use]
    pub fn new(days: u32, ticks_per_day: u32) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2011, 11, 28).unwrap_or_default(),
            days,
            ticks_per_day,
        }
    }

    /// Total number of ticks the config produces.
    #[must_use]
    pub const fn total_ticks(&self) -> u64 {
        self.days as u64 * self.ticks_per_day as u64
    }

    /// Calendar range covered by the series.
    #[must_use]
    pub fn range(&self) -> DateRange {
        let end = self
            .start
            .checked_add_days(chrono::Days::new(u64::from(self.days.saturating_sub(1))))
            .unwrap_or(self.start);
        DateRange {
            start: self.start,
            end,
        }
    }
}

/// Key used for every benchmark series.
///
/// # Errors
///
/// Returns an error if the fixed segments fail key validation.
pub fn bench_key() -> Result<PartitionKey, KeyError> {
    PartitionKey::new(AssetGroup::Futures, Source::Ib, "nymex", "CL", Some("201201".into()))
}

/// Generates a sorted random-walk tick series.
///
/// Uses a fixed linear congruential generator so every run sees the same
/// prices.
#[must_use]
pub fn synthetic_ticks(config: SeriesConfig) -> Vec<Tick> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut price = 100.0;
    let step = 86_400.0 / f64::from(config.ticks_per_day.max(1));
    let mut ticks = Vec::with_capacity(config.total_ticks() as usize);

    for day in config.range().days() {
        let base = start_of_day(day);
        for i in 0..config.ticks_per_day {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let shock = ((state >> 32) as f64 / f64::from(u32::MAX)) - 0.5;
            let open = price;
            price = (price + shock * 0.1).max(0.01);
            let (high, low) = (open.max(price), open.min(price));
            ticks.push(Tick::new(
                base + f64::from(i) * step,
                open,
                high,
                low,
                price,
                (state >> 52) + 1,
                (state >> 60) + 1,
                (open + price) / 2.0,
                false,
            ));
        }
    }
    ticks
}

/// Close prices of a synthetic series of `n` ticks.
#[must_use]
pub fn synthetic_closes(n: u32) -> Vec<f64> {
    synthetic_ticks(SeriesConfig::new(1, n))
        .iter()
        .map(|t| t.close)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ticks_are_sorted_and_sized() {
        let config = SeriesConfig::new(3, 100);
        let ticks = synthetic_ticks(config);

        assert_eq!(ticks.len() as u64, config.total_ticks());
        assert!(ticks.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(ticks[0].date(), Some(config.start));
    }

    #[test]
    fn test_synthetic_ticks_are_deterministic() {
        let config = SeriesConfig::new(1, 50);
        assert_eq!(synthetic_ticks(config), synthetic_ticks(config));
    }
}
