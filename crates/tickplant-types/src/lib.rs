//! Core types for the tickplant tick partitioning engine.
//!
//! This crate provides the fundamental data structures used throughout tickplant:
//!
//! - [`Tick`] - One OHLCV + VWAP bar and its `.tks` line format
//! - [`DateRange`] - Inclusive range of calendar dates with day iteration
//! - [`PartitionKey`] - Identifies a series and maps it onto the plant layout
//! - [`day_bounds`] - Half-open UTC epoch interval of one calendar day

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod key;
mod tick;

pub use date_range::{
    DateRange, DayIterator, SECONDS_PER_DAY, day_bounds, parse_datetime, start_of_day,
};
pub use error::{DateRangeError, KeyError, TickParseError};
pub use key::{AssetGroup, PartitionKey, Source, TICK_FILE_EXTENSION};
pub use tick::Tick;
