//! Per-day statistics, coverage gaps and duplicate repair for a series.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tickplant_calendar::TradingCalendar;
use tickplant_types::{DateRange, PartitionKey};
use tracing::{debug, info};

use crate::source::{dedup_ticks, read_ticks, sort_ticks};
use crate::writer::write_atomic;
use crate::{Plant, PlantError};

/// Suffix of the backup kept by [`Plant::repair_duplicates`].
pub const BACKUP_SUFFIX: &str = "original";

/// Statistics for one day file of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    /// The day the file belongs to.
    pub date: NaiveDate,
    /// The partition file.
    pub path: PathBuf,
    /// Number of parsed rows.
    pub rows: usize,
    /// Earliest timestamp in the file.
    pub first: Option<f64>,
    /// Latest timestamp in the file.
    pub last: Option<f64>,
    /// Rows whose timestamp repeats another row.
    pub duplicates: usize,
    /// Lines that could not be parsed.
    pub rejected: usize,
    /// True for a zero-length file.
    pub empty: bool,
}

/// Outcome of a duplicate repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    /// Day files inspected.
    pub files_checked: usize,
    /// Day files that were rewritten.
    pub files_repaired: usize,
    /// Rows removed across all files.
    pub rows_removed: usize,
}

impl Plant {
    /// Returns statistics for every day file of a series, in date order.
    ///
    /// Directories that are not `YYYY/MM/DD` dates are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or day file cannot be read.
    pub fn inspect_series(&self, key: &PartitionKey) -> Result<Vec<DayStats>, PlantError> {
        let mut stats = Vec::new();

        for (date, path) in self.day_files(key)? {
            let empty = fs::metadata(&path).map_or(true, |m| m.len() == 0);
            let file = read_ticks(&path)?;

            let mut ticks = file.ticks;
            let rows = ticks.len();
            sort_ticks(&mut ticks);
            let first = ticks.first().map(|t| t.timestamp);
            let last = ticks.last().map(|t| t.timestamp);
            let duplicates = dedup_ticks(&mut ticks);

            stats.push(DayStats {
                date,
                path,
                rows,
                first,
                last,
                duplicates,
                rejected: file.rejected.len(),
                empty,
            });
        }

        Ok(stats)
    }

    /// Returns the trading days in `range` that have no partition file or
    /// only a zero-length one.
    ///
    /// # Errors
    ///
    /// Returns [`PlantError::Stat`] if a day file exists but cannot be
    /// inspected, for example because its directory is not readable.
    pub fn missing_trading_days(
        &self,
        key: &PartitionKey,
        range: DateRange,
        calendar: &TradingCalendar,
    ) -> Result<Vec<NaiveDate>, PlantError> {
        let mut missing = Vec::new();
        for date in calendar.trading_days(range) {
            let path = key.day_file(self.root(), date);
            let absent = match fs::metadata(&path) {
                Ok(meta) => meta.len() == 0,
                Err(e) if e.kind() == io::ErrorKind::NotFound => true,
                Err(e) => return Err(PlantError::Stat { path, source: e }),
            };
            if absent {
                missing.push(date);
            }
        }
        Ok(missing)
    }

    /// Rewrites every day file of a series that holds duplicate timestamps.
    ///
    /// Rows are sorted and the first occurrence of each timestamp kept. With
    /// `backup` the previous file is preserved as `<symbol>.tks.original`.
    /// Files with malformed lines are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or rewritten.
    pub fn repair_duplicates(
        &self,
        key: &PartitionKey,
        backup: bool,
    ) -> Result<RepairSummary, PlantError> {
        let mut summary = RepairSummary::default();

        for (date, path) in self.day_files(key)? {
            summary.files_checked += 1;
            let file = read_ticks(&path)?;
            if !file.is_clean() {
                debug!(path = %path.display(), "skipping file with malformed lines");
                continue;
            }

            let mut ticks = file.ticks;
            sort_ticks(&mut ticks);
            let removed = dedup_ticks(&mut ticks);
            if removed == 0 {
                continue;
            }

            if backup {
                let backup_path = backup_path(&path);
                fs::copy(&path, &backup_path).map_err(|e| PlantError::Write {
                    path: backup_path.clone(),
                    source: e,
                })?;
            }
            write_atomic(&path, &ticks).map_err(|e| PlantError::Write {
                path: path.clone(),
                source: e,
            })?;

            info!(symbol = %key, %date, removed, "repaired duplicate timestamps");
            summary.files_repaired += 1;
            summary.rows_removed += removed;
        }

        Ok(summary)
    }

    /// Lists `(date, file)` for every day file of a series, in date order.
    pub(crate) fn day_files(
        &self,
        key: &PartitionKey,
    ) -> Result<Vec<(NaiveDate, PathBuf)>, PlantError> {
        let series = key.series_dir(self.root());
        if !series.is_dir() {
            return Ok(Vec::new());
        }

        let file_name = key.file_name();
        let mut files = Vec::new();
        for (year, year_dir) in numbered_dirs(&series)? {
            for (month, month_dir) in numbered_dirs(&year_dir)? {
                for (day, day_dir) in numbered_dirs(&month_dir)? {
                    let Some(date) = i32::try_from(year)
                        .ok()
                        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
                    else {
                        continue;
                    };
                    let path = day_dir.join(&file_name);
                    if path.is_file() {
                        files.push((date, path));
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Lists the subdirectories of `dir` whose names are plain numbers.
fn numbered_dirs(dir: &Path) -> Result<Vec<(u32, PathBuf)>, PlantError> {
    let entries = fs::read_dir(dir).map_err(|e| PlantError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PlantError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let number = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u32>().ok());
        match number {
            Some(n) if path.is_dir() => dirs.push((n, path)),
            _ => debug!(path = %path.display(), "ignoring non-date entry"),
        }
    }
    Ok(dirs)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
