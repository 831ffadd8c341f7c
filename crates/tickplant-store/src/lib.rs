//! Calendar-partitioned tick storage for tickplant.
//!
//! - [`read_ticks`] parses a raw whitespace-delimited source file and reports
//!   malformed lines instead of aborting
//! - [`TimeIndex`] answers half-open day queries over a sorted series
//! - [`PartitionWriter`] writes one file per trading day with atomic renames
//! - [`Plant`] reads the partitioned tree back, inspects it and repairs
//!   duplicate timestamps
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use tickplant_calendar::TradingCalendar;
//! use tickplant_store::{Plant, read_ticks};
//! use tickplant_types::{AssetGroup, PartitionKey, Source};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let calendar = TradingCalendar::load("/opt/plant/holidays.list")?;
//! let plant = Plant::new("/opt/plant/ticks");
//! let key = PartitionKey::new(AssetGroup::Equities, Source::Ib, "smart", "AAPL", None)?;
//!
//! let mut source = read_ticks("AAPL.tks")?;
//! let summary = plant.writer(&calendar).partition(
//!     &key,
//!     &mut source.ticks,
//!     NaiveDate::from_ymd_opt(2011, 12, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2011, 12, 31).unwrap(),
//! )?;
//! println!("wrote {} days", summary.days_written);
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod index;
mod inspect;
mod legacy;
mod plant;
mod source;
mod writer;

pub use error::{LineError, PartitionError, PlantError, RangeError, SourceReadError};
pub use index::TimeIndex;
pub use inspect::{BACKUP_SUFFIX, DayStats, RepairSummary};
pub use legacy::{parse_legacy_ticks, read_legacy_ticks};
pub use plant::{DayPartition, Plant, concat_days};
pub use source::{TickFile, dedup_ticks, parse_ticks, read_ticks, sort_ticks, write_ticks};
pub use writer::{PartitionSummary, PartitionWriter, WritePolicy};
