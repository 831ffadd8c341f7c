//! Stats command: per-day statistics and coverage gaps of a series.

use crate::SeriesArgs;
use crate::config::Settings;
use crate::display::{parse_date_arg, print_stats_table};
use anyhow::{Context, Result};
use tickplant_lib::{DateRange, Plant};

/// Execute the stats command.
pub(crate) fn stats(
    series: &SeriesArgs,
    start: Option<&str>,
    end: Option<&str>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let key = series.key()?;
    let plant = Plant::new(settings.root());
    let stats = plant
        .inspect_series(&key)
        .with_context(|| format!("Failed to inspect {key}"))?;

    // Missing days are checked between the first and last stored day unless
    // a window is given.
    let first = stats.first().map(|d| d.date);
    let last = stats.last().map(|d| d.date);
    let start = parse_date_arg(start, "start")?.or(first);
    let end = parse_date_arg(end, "end")?.or(last);
    let missing = match (start, end) {
        (Some(start), Some(end)) => {
            let calendar = settings.calendar()?;
            let range = DateRange::new(start, end)?;
            plant
                .missing_trading_days(&key, range, &calendar)
                .with_context(|| format!("Failed to check missing days of {key}"))?
        }
        _ => Vec::new(),
    };

    if json {
        let report = serde_json::json!({
            "series": key.to_string(),
            "days": stats,
            "missing": missing,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No partition files for {key}.");
    } else {
        print_stats_table(&key, &stats);
    }

    let rows: usize = stats.iter().map(|d| d.rows).sum();
    let duplicates: usize = stats.iter().map(|d| d.duplicates).sum();
    let empty = stats.iter().filter(|d| d.empty).count();
    println!(
        "\nTotal: {} days, {rows} rows, {duplicates} duplicate timestamps, {empty} empty files",
        stats.len()
    );

    if !missing.is_empty() {
        println!("Missing trading days ({}):", missing.len());
        for date in &missing {
            println!("  {date}");
        }
    }

    Ok(())
}
