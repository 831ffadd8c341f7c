//! Day-range queries over a sorted tick sequence.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tickplant_types::{DateRange, Tick, day_bounds};

use crate::RangeError;

/// Binary-search index over ticks sorted by timestamp.
///
/// Every query uses the same half-open contract: a day covers
/// `[start_of_day, start_of_next_day)`.
#[derive(Debug, Clone, Copy)]
pub struct TimeIndex<'a> {
    ticks: &'a [Tick],
    window: DateRange,
}

impl<'a> TimeIndex<'a> {
    /// Builds an index over `ticks` for queries inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Unsorted`] if the ticks are not in timestamp
    /// order. A NaN timestamp never compares as ordered.
    pub fn new(ticks: &'a [Tick], window: DateRange) -> Result<Self, RangeError> {
        if let Some(position) = ticks
            .windows(2)
            .position(|pair| {
                !matches!(
                    pair[0].timestamp.partial_cmp(&pair[1].timestamp),
                    Some(Ordering::Less | Ordering::Equal)
                )
            })
        {
            return Err(RangeError::Unsorted {
                position: position + 1,
            });
        }
        Ok(Self { ticks, window })
    }

    /// Returns the window this index answers queries for.
    #[must_use]
    pub const fn window(&self) -> DateRange {
        self.window
    }

    /// Returns the ticks with `start_of_day(day) <= timestamp < start_of_day(day + 1)`.
    ///
    /// A day without ticks yields an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::OutsideWindow`] if `day` is not inside the window.
    pub fn day_slice(&self, day: NaiveDate) -> Result<&'a [Tick], RangeError> {
        if !self.window.contains(day) {
            return Err(RangeError::OutsideWindow {
                day,
                window: self.window,
            });
        }
        let (start, end) = day_bounds(day);
        Ok(self.between(start, end))
    }

    /// Returns the ticks with `start <= timestamp < end`.
    #[must_use]
    pub fn between(&self, start: f64, end: f64) -> &'a [Tick] {
        let lower = self.lower_bound(start);
        let upper = self.lower_bound(end).max(lower);
        &self.ticks[lower..upper]
    }

    /// Index of the first tick whose timestamp is `>= threshold`.
    fn lower_bound(&self, threshold: f64) -> usize {
        self.ticks.partition_point(|t| t.timestamp < threshold)
    }
}
