//! Argument parsing helpers and output formatting for the tickplant CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use indicatif::ProgressStyle;
use tickplant_lib::{DayStats, PartitionKey, WritePolicy, parse_datetime};

use crate::SeriesArgs;

/// How `partition` treats day files that already exist.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Policy {
    /// Rewrite the day from the new input.
    Replace,
    /// Union the existing day file with the new input.
    Merge,
}

impl From<Policy> for WritePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Replace => Self::Replace,
            Policy::Merge => Self::Merge,
        }
    }
}

impl SeriesArgs {
    /// Builds the partition key for this series.
    pub(crate) fn key(&self) -> Result<PartitionKey> {
        PartitionKey::new(
            self.group,
            self.source,
            &self.exchange,
            &self.symbol,
            self.contract.clone(),
        )
        .with_context(|| format!("Invalid series {}", self.symbol))
    }
}

/// Parses an optional `YYYY-MM-DD[ HH:MM:SS]` argument down to its date.
pub(crate) fn parse_date_arg(value: Option<&str>, what: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            parse_datetime(s)
                .map(|dt| dt.date())
                .with_context(|| format!("Invalid {what} date: {s}"))
        })
        .transpose()
}

/// Style for the batch progress bar.
pub(crate) fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

/// Formats an epoch timestamp as `YYYY/MM/DD HH:MM:SS` UTC.
pub(crate) fn format_timestamp(timestamp: f64) -> String {
    chrono::DateTime::from_timestamp(timestamp.floor() as i64, 0).map_or_else(
        || format!("{timestamp}"),
        |dt| dt.format("%Y/%m/%d %H:%M:%S").to_string(),
    )
}

/// Prints per-day statistics as a table.
pub(crate) fn print_stats_table(key: &PartitionKey, stats: &[DayStats]) {
    println!("Series: {key}");
    println!(
        "{:<12} {:<20} {:<20} {:>8} {:>6} {:>6}",
        "DATE", "FIRST", "LAST", "ROWS", "DUPS", "BAD"
    );
    println!("{}", "-".repeat(77));

    for day in stats {
        let first = day.first.map_or_else(|| "-".to_string(), format_timestamp);
        let last = day.last.map_or_else(|| "-".to_string(), format_timestamp);
        println!(
            "{:<12} {:<20} {:<20} {:>8} {:>6} {:>6}",
            day.date.format("%Y-%m-%d").to_string(),
            first,
            last,
            day.rows,
            day.duplicates,
            day.rejected
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        let date = parse_date_arg(Some("2011-12-01 13:30:00"), "start").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2011, 12, 1));

        assert_eq!(parse_date_arg(None, "start").unwrap(), None);
        assert!(parse_date_arg(Some("12/01/2011"), "start").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_322_746_200.5), "2011/12/01 13:30:00");
    }
}
