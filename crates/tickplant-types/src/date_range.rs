//! Date ranges, day iteration and UTC day bounds.

use chrono::{NaiveDate, NaiveDateTime};

use crate::DateRangeError;

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// A range of calendar dates, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the overlap of two ranges, or `None` if they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Returns an iterator over every date in the range.
    pub fn days(&self) -> DayIterator {
        DayIterator {
            current: Some(self.start),
            end: self.end,
        }
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over all days in a date range.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.filter(|d| *d <= self.end)?;
        self.current = current.succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .current
            .filter(|d| *d <= self.end)
            .map_or(0, |d| (self.end - d).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayIterator {}

/// Returns the epoch second at which `date` starts (00:00:00 UTC).
#[must_use]
pub fn start_of_day(date: NaiveDate) -> f64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() as f64
}

/// Returns the half-open epoch-second interval `[start, end)` covering `date`.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (f64, f64) {
    let start = start_of_day(date);
    (start, start + SECONDS_PER_DAY)
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` (also accepting a `T`
/// separator) into a UTC date-time.
///
/// # Errors
///
/// Returns an error if the text matches neither layout.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, DateRangeError> {
    let text = text.trim();
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| DateRangeError::InvalidDate(text.to_string()))
}
