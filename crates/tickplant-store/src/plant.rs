//! Read access to the partitioned plant.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tickplant_calendar::TradingCalendar;
use tickplant_types::{DateRange, PartitionKey, Tick};

use crate::source::read_ticks;
use crate::{LineError, PartitionWriter, PlantError};

/// One day's partition file as read back from the plant.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPartition {
    /// The trading day.
    pub date: NaiveDate,
    /// The partition file.
    pub path: PathBuf,
    /// Parsed ticks, in file order.
    pub ticks: Vec<Tick>,
    /// Malformed lines that were skipped.
    pub rejected: Vec<LineError>,
}

/// Handle on a ticker plant rooted at one directory.
#[derive(Debug, Clone)]
pub struct Plant {
    root: PathBuf,
}

impl Plant {
    /// Creates a handle on the plant rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the plant root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a writer into this plant.
    #[must_use]
    pub fn writer<'a>(&self, calendar: &'a TradingCalendar) -> PartitionWriter<'a> {
        PartitionWriter::new(self.root.clone(), calendar)
    }

    /// Loads one day of a series, or `None` if no partition file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_day(
        &self,
        key: &PartitionKey,
        date: NaiveDate,
    ) -> Result<Option<DayPartition>, PlantError> {
        let path = key.day_file(&self.root, date);
        if !path.is_file() {
            return Ok(None);
        }

        let file = read_ticks(&path)?;
        Ok(Some(DayPartition {
            date,
            path,
            ticks: file.ticks,
            rejected: file.rejected,
        }))
    }

    /// Loads every existing day of a series inside `range`, in date order.
    ///
    /// Only days that have a partition file are visited, so an open-ended
    /// range costs no more than the series itself.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory of the series or an existing
    /// partition file cannot be read.
    pub fn load_range(
        &self,
        key: &PartitionKey,
        range: DateRange,
    ) -> Result<Vec<DayPartition>, PlantError> {
        self.day_files(key)?
            .into_iter()
            .filter(|(date, _)| range.contains(*date))
            .map(|(date, path)| -> Result<DayPartition, PlantError> {
                let file = read_ticks(&path)?;
                Ok(DayPartition {
                    date,
                    path,
                    ticks: file.ticks,
                    rejected: file.rejected,
                })
            })
            .collect()
    }
}

/// Concatenates the ticks of loaded days into one series.
#[must_use]
pub fn concat_days(days: &[DayPartition]) -> Vec<Tick> {
    days.iter().flat_map(|d| d.ticks.iter().copied()).collect()
}
