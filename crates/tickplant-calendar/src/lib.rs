//! Trading calendar for the tickplant tick partitioning engine.
//!
//! A [`TradingCalendar`] is built once at startup and passed by reference to
//! everything that needs to know whether a date is a trading day.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tickplant_calendar::TradingCalendar;
//!
//! let christmas = NaiveDate::from_ymd_opt(2012, 12, 25).unwrap();
//! let calendar = TradingCalendar::from_dates([christmas]);
//!
//! assert!(!calendar.is_trading_day(christmas));
//! assert!(calendar.is_trading_day(NaiveDate::from_ymd_opt(2012, 12, 24).unwrap()));
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;
use tickplant_types::DateRange;
use tracing::debug;

/// Errors that can occur while loading the holiday list.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The holiday file is missing or unreadable.
    #[error("Failed to read holiday file '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line of the holiday file is not a `YYYY-MM-DD` date.
    #[error("Invalid holiday '{value}' at {path}:{line}")]
    InvalidDate {
        /// The holiday file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The rejected text.
        value: String,
    },
}

/// Holiday set plus the Monday to Friday rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl TradingCalendar {
    /// Creates a calendar from an explicit set of holidays.
    #[must_use]
    pub fn from_dates(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Creates a calendar with no holidays (every weekday trades).
    #[must_use]
    pub fn weekdays_only() -> Self {
        Self::default()
    }

    /// Loads the holiday list from a file with one `YYYY-MM-DD` per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any remaining line is
    /// not a valid date.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CalendarError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CalendarError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let calendar = Self::parse(&content).map_err(|(line, value)| {
            CalendarError::InvalidDate {
                path: path.to_path_buf(),
                line,
                value,
            }
        })?;

        debug!(path = %path.display(), holidays = calendar.len(), "loaded trading calendar");
        Ok(calendar)
    }

    /// Parses holiday list text, returning the first bad line on failure.
    fn parse(content: &str) -> Result<Self, (usize, String)> {
        let mut holidays = BTreeSet::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let date = NaiveDate::parse_from_str(line, "%Y-%m-%d")
                .map_err(|_| (index + 1, line.to_string()))?;
            holidays.insert(date);
        }
        Ok(Self { holidays })
    }

    /// Returns true if `date` is Monday to Friday and not a listed holiday.
    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// Returns true if `date` is on the holiday list.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns the trading days of a range, in order.
    pub fn trading_days(&self, range: DateRange) -> impl Iterator<Item = NaiveDate> + '_ {
        range.days().filter(|d| self.is_trading_day(*d))
    }

    /// Returns the number of listed holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no holidays are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}
