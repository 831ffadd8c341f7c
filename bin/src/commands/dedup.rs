//! Dedup command implementation.

use crate::SeriesArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use tickplant_lib::Plant;

/// Rewrite every day file of a series that repeats a timestamp.
pub(crate) fn dedup(
    series: &SeriesArgs,
    backup: bool,
    settings: &Settings,
    quiet: bool,
) -> Result<()> {
    let key = series.key()?;
    let summary = Plant::new(settings.root())
        .repair_duplicates(&key, backup)
        .with_context(|| format!("Failed to repair {key}"))?;

    if !quiet {
        println!("Series: {key}");
        println!("  Files checked: {}", summary.files_checked);
        println!("  Files repaired: {}", summary.files_repaired);
        println!("  Rows removed: {}", summary.rows_removed);
    }
    Ok(())
}
