//! Calendar-aware partitioning of a tick series into per-day files.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tempfile::NamedTempFile;
use tickplant_calendar::TradingCalendar;
use tickplant_types::{DateRange, PartitionKey, Tick};
use tracing::{debug, info, warn};

use crate::source::{dedup_ticks, read_ticks, sort_ticks, write_ticks};
use crate::{PartitionError, TimeIndex};

/// What to do when a day's partition file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Rewrite the file from the freshly computed day subset.
    #[default]
    Replace,
    /// Union the existing rows with the new subset; existing rows win on
    /// equal timestamps.
    Merge,
}

/// Outcome of one [`PartitionWriter::partition`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    /// Days for which a partition file was written or updated.
    pub days_written: usize,
    /// Weekend and holiday days skipped inside the effective window.
    pub non_trading_days_skipped: usize,
    /// Trading days inside the effective window that had no ticks.
    pub empty_days_skipped: usize,
    /// Rows written across all day files.
    pub rows_written: usize,
    /// Rows dropped because their timestamp repeated an earlier row.
    pub duplicates_removed: usize,
    /// Files written, in date order.
    pub files: Vec<PathBuf>,
}

/// Buckets a tick series into `<series>/<YYYY>/<MM>/<DD>/<symbol>.tks` files.
#[derive(Debug, Clone)]
pub struct PartitionWriter<'a> {
    root: PathBuf,
    calendar: &'a TradingCalendar,
    policy: WritePolicy,
}

impl<'a> PartitionWriter<'a> {
    /// Creates a writer for the plant rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, calendar: &'a TradingCalendar) -> Self {
        Self {
            root: root.into(),
            calendar,
            policy: WritePolicy::default(),
        }
    }

    /// Sets the policy for days that already have a partition file.
    #[must_use]
    pub const fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the plant root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Partitions `ticks` into one file per trading day between
    /// `requested_start` and `requested_end` (inclusive).
    ///
    /// The ticks are sorted in place. The requested window is clamped to the
    /// dates of the first and last tick; a window that does not overlap the
    /// data writes nothing. Within each day the first tick of every
    /// timestamp wins and later repeats are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `ticks` is empty, a timestamp is not finite or
    /// cannot be mapped to a date, or a destination cannot be written. A
    /// failure after some days were written is
    /// [`PartitionError::Incomplete`], carrying the summary of those days.
    pub fn partition(
        &self,
        key: &PartitionKey,
        ticks: &mut [Tick],
        requested_start: NaiveDate,
        requested_end: NaiveDate,
    ) -> Result<PartitionSummary, PartitionError> {
        if ticks.is_empty() {
            return Err(PartitionError::NoTicks {
                symbol: key.to_string(),
            });
        }

        if let Some(bad) = ticks.iter().find(|t| !t.timestamp.is_finite()) {
            return Err(PartitionError::UnresolvableTimestamp(bad.timestamp));
        }

        sort_ticks(ticks);
        let first = tick_date(&ticks[0])?;
        let last = tick_date(&ticks[ticks.len() - 1])?;

        let effective_start = requested_start.max(first);
        let effective_end = requested_end.min(last);
        let mut summary = PartitionSummary::default();

        if effective_start > effective_end {
            let data = DateRange {
                start: first,
                end: last,
            };
            info!(
                symbol = %key,
                data = %data,
                requested_start = %requested_start,
                requested_end = %requested_end,
                "requested window does not overlap the data"
            );
            return Ok(summary);
        }

        let window = DateRange {
            start: effective_start,
            end: effective_end,
        };
        let index = TimeIndex::new(ticks, window)?;

        for day in window.days() {
            if let Err(error) = self.partition_day(key, &index, day, &mut summary) {
                if summary.days_written == 0 {
                    return Err(error);
                }
                warn!(
                    symbol = %key,
                    %day,
                    written = summary.days_written,
                    "partition stopped after writing earlier days"
                );
                return Err(PartitionError::Incomplete {
                    day,
                    written: summary,
                    source: Box::new(error),
                });
            }
        }

        info!(
            symbol = %key,
            window = %window,
            days = summary.days_written,
            rows = summary.rows_written,
            duplicates = summary.duplicates_removed,
            "partitioned series"
        );
        Ok(summary)
    }

    /// Partitions one day of the window into `summary`.
    fn partition_day(
        &self,
        key: &PartitionKey,
        index: &TimeIndex<'_>,
        day: NaiveDate,
        summary: &mut PartitionSummary,
    ) -> Result<(), PartitionError> {
        if !self.calendar.is_trading_day(day) {
            summary.non_trading_days_skipped += 1;
            return Ok(());
        }

        let subset = index.day_slice(day)?;
        if subset.is_empty() {
            summary.empty_days_skipped += 1;
            return Ok(());
        }

        let mut rows = subset.to_vec();
        let duplicates = dedup_ticks(&mut rows);
        if duplicates > 0 {
            warn!(symbol = %key, %day, duplicates, "dropped duplicate timestamps");
        }

        let path = key.day_file(&self.root, day);
        let (rows_written, merged_duplicates) = self.write_day(&path, rows)?;
        debug!(symbol = %key, %day, rows = rows_written, path = %path.display(), "wrote partition");

        summary.days_written += 1;
        summary.rows_written += rows_written;
        summary.duplicates_removed += duplicates + merged_duplicates;
        summary.files.push(path);
        Ok(())
    }

    /// Writes one day's rows according to the policy.
    ///
    /// Returns the number of rows in the file and, for merges, the number of
    /// new rows dropped because the file already held their timestamp.
    fn write_day(&self, path: &Path, rows: Vec<Tick>) -> Result<(usize, usize), PartitionError> {
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(|e| PartitionError::DestinationWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let (rows, dropped) = match self.policy {
            WritePolicy::Replace => (rows, 0),
            WritePolicy::Merge => merge_with_existing(path, rows)?,
        };

        write_atomic(path, &rows).map_err(|e| PartitionError::DestinationWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok((rows.len(), dropped))
    }
}

fn tick_date(tick: &Tick) -> Result<NaiveDate, PartitionError> {
    tick.date()
        .ok_or(PartitionError::UnresolvableTimestamp(tick.timestamp))
}

/// Combines an existing partition file with new rows, existing rows first.
fn merge_with_existing(
    path: &Path,
    rows: Vec<Tick>,
) -> Result<(Vec<Tick>, usize), PartitionError> {
    let existing_len = fs::metadata(path).map_or(0, |m| m.len());
    if existing_len == 0 {
        return Ok((rows, 0));
    }

    let existing = read_ticks(path)?;
    if let Some(error) = existing.rejected.into_iter().next() {
        return Err(PartitionError::CorruptPartition {
            path: path.to_path_buf(),
            error,
        });
    }

    let mut merged = existing.ticks;
    merged.extend(rows);
    sort_ticks(&mut merged);
    let removed = dedup_ticks(&mut merged);
    Ok((merged, removed))
}

/// Writes `ticks` to `path` through a temp file in the same directory.
///
/// Readers see either the old file or the complete new one.
pub(crate) fn write_atomic(path: &Path, ticks: &[Tick]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "partition path has no parent"))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_ticks(ticks, &mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
