//! Indicator command: loads a stored series and prints a derived series.

use crate::config::Settings;
use crate::display::parse_date_arg;
use crate::{IndicatorKind, SeriesArgs};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tickplant_lib::indicators::{self, PriceField};
use tickplant_lib::{DateRange, Plant, concat_days};
use tracing::warn;

/// Execute the indicator command.
pub(crate) fn indicator(
    series: &SeriesArgs,
    field: PriceField,
    kind: IndicatorKind,
    start: Option<&str>,
    end: Option<&str>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let key = series.key()?;
    let start = parse_date_arg(start, "start")?.unwrap_or(NaiveDate::MIN);
    let end = parse_date_arg(end, "end")?.unwrap_or(NaiveDate::MAX);
    let range = DateRange::new(start, end)?;

    let days = Plant::new(settings.root())
        .load_range(&key, range)
        .with_context(|| format!("Failed to load {key}"))?;
    for day in days.iter().filter(|d| !d.rejected.is_empty()) {
        warn!(path = %day.path.display(), rejected = day.rejected.len(), "skipped malformed lines");
    }

    let ticks = concat_days(&days);
    if ticks.is_empty() {
        bail!("No ticks stored for {key} between {start} and {end}");
    }
    let values = indicators::extract(&ticks, field);

    // dema reduces the series to one number.
    if let IndicatorKind::Dema { alpha, delta } = kind {
        let change = indicators::dema(&values, alpha, delta)?;
        if json {
            println!("{}", serde_json::json!({ "series": key.to_string(), "dema": change }));
        } else {
            println!("{change}");
        }
        return Ok(());
    }

    let output = compute(kind, &values)?;
    if json {
        let points: Vec<_> = ticks
            .iter()
            .zip(&output)
            .map(|(t, v)| serde_json::json!({ "timestamp": t.timestamp, "value": v }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        for (tick, value) in ticks.iter().zip(&output) {
            println!("{} {value}", tick.timestamp);
        }
    }
    Ok(())
}

/// Runs a series-valued indicator.
fn compute(kind: IndicatorKind, x: &[f64]) -> Result<Vec<f64>> {
    let output = match kind {
        IndicatorKind::Sma { window } => indicators::sma(x, window)?,
        IndicatorKind::Ema { alpha } => indicators::ema(x, alpha)?,
        IndicatorKind::Cma => indicators::cma(x),
        IndicatorKind::Rofc { periods } => indicators::rofc(x, periods)?,
        IndicatorKind::Rsi { periods } => indicators::rsi(x, periods)?,
        IndicatorKind::Dpo { periods } => indicators::dpo(x, periods)?,
        IndicatorKind::Zscore => indicators::zscore(x)?,
        IndicatorKind::Normalize => indicators::normalize(x)?,
        IndicatorKind::Lshift { steps } => indicators::lshift(x, steps)?,
        IndicatorKind::Rshift { steps, fill } => indicators::rshift(x, steps, fill)?,
        IndicatorKind::Dema { .. } => bail!("dema yields a single value, not a series"),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_dispatch() {
        let x = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(
            compute(IndicatorKind::Sma { window: 2 }, &x).unwrap(),
            vec![1.0, 1.5, 2.5, 3.5]
        );
        assert_eq!(
            compute(IndicatorKind::Rshift { steps: 1, fill: Some(0.0) }, &x).unwrap(),
            vec![0.0, 1.0, 2.0, 3.0]
        );
        assert!(compute(IndicatorKind::Sma { window: 0 }, &x).is_err());
        assert!(compute(IndicatorKind::Dema { alpha: 0.5, delta: 1 }, &x).is_err());
    }
}
