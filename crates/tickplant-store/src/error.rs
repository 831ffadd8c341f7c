//! Error types for plant storage.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use tickplant_types::{DateRange, TickParseError};

use crate::PartitionSummary;

/// The input tick file is missing or unreadable.
#[derive(Error, Debug)]
#[error("Failed to read tick file '{path}': {source}")]
pub struct SourceReadError {
    /// The path that could not be read.
    pub path: PathBuf,
    /// The underlying I/O error.
    pub source: std::io::Error,
}

/// A malformed line, skipped while reading a tick file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {error}")]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// Why the line was rejected.
    pub error: TickParseError,
}

/// Errors from day-range queries on a [`TimeIndex`](crate::TimeIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The ticks are not sorted by timestamp.
    #[error("ticks are not sorted by timestamp at position {position}")]
    Unsorted {
        /// Index of the first tick earlier than its predecessor.
        position: usize,
    },

    /// The queried day lies outside the window the index was built for.
    #[error("day {day} is outside the indexed window {window}")]
    OutsideWindow {
        /// The queried day.
        day: NaiveDate,
        /// The declared window.
        window: DateRange,
    },
}

/// Errors that can occur while partitioning a series.
#[derive(Error, Debug)]
pub enum PartitionError {
    /// There were no ticks to partition.
    #[error("No ticks to partition for {symbol}")]
    NoTicks {
        /// The series that was empty.
        symbol: String,
    },

    /// A timestamp is not finite or cannot be represented as a calendar date.
    #[error("Timestamp {0} cannot be mapped to a calendar date")]
    UnresolvableTimestamp(f64),

    /// Day slicing failed.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A destination directory or file could not be written.
    #[error("Failed to write partition '{path}': {source}")]
    DestinationWrite {
        /// The directory or file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An existing partition file could not be read for merging.
    #[error(transparent)]
    ExistingRead(#[from] SourceReadError),

    /// An existing partition file holds malformed lines and cannot be merged.
    #[error("Existing partition '{path}' is corrupt at {error}")]
    CorruptPartition {
        /// The partition file.
        path: PathBuf,
        /// The first malformed line.
        error: LineError,
    },

    /// A day failed after earlier days had already been written.
    #[error("Partition stopped at {day} after earlier days were written: {source}")]
    Incomplete {
        /// The day that failed.
        day: NaiveDate,
        /// The days written before the failure. Their files are on disk.
        written: PartitionSummary,
        /// Why the day failed.
        source: Box<PartitionError>,
    },
}

impl PartitionError {
    /// Returns the days written before the failure, if any were.
    #[must_use]
    pub const fn written(&self) -> Option<&PartitionSummary> {
        match self {
            Self::Incomplete { written, .. } => Some(written),
            _ => None,
        }
    }
}

/// Errors that can occur while reading, inspecting or repairing the plant.
#[derive(Error, Debug)]
pub enum PlantError {
    /// A directory of the plant could not be listed.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A partition file could not be read.
    #[error(transparent)]
    Read(#[from] SourceReadError),

    /// A partition file could not be inspected.
    #[error("Failed to stat '{path}': {source}")]
    Stat {
        /// The path that could not be inspected.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A partition file could not be rewritten.
    #[error("Failed to write partition '{path}': {source}")]
    Write {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
