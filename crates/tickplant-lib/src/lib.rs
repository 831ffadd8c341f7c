//! Calendar-partitioned ticker plant and streaming indicators.
//!
//! This is a facade crate that re-exports functionality from the tickplant
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickplant_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calendar = TradingCalendar::load("holidays.list")?;
//!     let plant = Plant::new("/opt/plant/ticks");
//!     let key = PartitionKey::new(AssetGroup::Futures, Source::Ib, "nymex", "CL", Some("201201".into()))?;
//!
//!     let range = DateRange::new(
//!         chrono::NaiveDate::from_ymd_opt(2011, 12, 1).unwrap(),
//!         chrono::NaiveDate::from_ymd_opt(2011, 12, 31).unwrap(),
//!     )?;
//!
//!     let ticks = concat_days(&plant.load_range(&key, range)?);
//!     let closes = extract(&ticks, PriceField::Close);
//!     println!("{:?}", rsi(&closes, 14)?.last());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/bicycletrading/tickplant/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickplant_types::*;

// Re-export the trading calendar
pub use tickplant_calendar::{CalendarError, TradingCalendar};

// Re-export storage
#[cfg(feature = "store")]
pub use tickplant_store::{
    DayPartition, DayStats, LineError, PartitionError, PartitionSummary, PartitionWriter, Plant,
    PlantError, RangeError, RepairSummary, SourceReadError, TickFile, TimeIndex, WritePolicy,
    concat_days, dedup_ticks, parse_legacy_ticks, parse_ticks, read_legacy_ticks, read_ticks,
    sort_ticks, write_ticks,
};

// Re-export indicators
#[cfg(feature = "indicators")]
pub use tickplant_indicators as indicators;

/// Prelude module for convenient imports.
///
/// ```
/// use tickplant_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickplant_types::{AssetGroup, DateRange, PartitionKey, Source, Tick};

    pub use tickplant_calendar::TradingCalendar;

    #[cfg(feature = "store")]
    pub use tickplant_store::{
        DayPartition, PartitionSummary, PartitionWriter, Plant, TickFile, WritePolicy,
        concat_days, read_ticks,
    };

    #[cfg(feature = "indicators")]
    pub use tickplant_indicators::{
        IndicatorError, PriceField, cma, dema, dpo, ema, extract, lshift, normalize, rofc,
        rshift, rsi, sma, zscore,
    };
}
