//! Partition command.
//!
//! Partitions a batch of symbols into the plant, each on its own blocking
//! worker. A symbol that fails is reported and the batch moves on; the
//! command exits non-zero after the summary if any symbol failed.

use crate::config::Settings;
use crate::display::{parse_date_arg, progress_style};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tickplant_lib::{
    AssetGroup, LineError, PartitionError, PartitionKey, PartitionSummary, PartitionWriter,
    Source, TICK_FILE_EXTENSION, TradingCalendar, WritePolicy, read_ticks,
};
use tracing::{error, info, warn};

/// Arguments of one partition run.
pub(crate) struct Batch {
    pub(crate) symbols: Vec<String>,
    pub(crate) input_dir: PathBuf,
    pub(crate) group: AssetGroup,
    pub(crate) source: Source,
    pub(crate) exchange: String,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) policy: WritePolicy,
    pub(crate) parallel: usize,
}

/// One symbol to partition.
#[derive(Debug, Clone)]
struct Job {
    key: PartitionKey,
    input: PathBuf,
}

/// What happened to one symbol.
#[derive(Debug)]
enum Outcome {
    Written {
        summary: PartitionSummary,
        rejected: Vec<LineError>,
    },
    Skipped(String),
    /// Partitioning failed after the input was read. `written` holds the
    /// days that reached disk before the failure.
    Failed {
        error: PartitionError,
        written: Option<PartitionSummary>,
        rejected: Vec<LineError>,
    },
}

/// Execute the partition command.
pub(crate) async fn partition(batch: Batch, settings: &Settings, quiet: bool) -> Result<()> {
    // The calendar is loaded before any symbol is touched.
    let calendar = Arc::new(settings.calendar()?);

    let start = parse_date_arg(batch.start.as_deref(), "start")?.unwrap_or(NaiveDate::MIN);
    let end = parse_date_arg(batch.end.as_deref(), "end")?
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let jobs = batch
        .symbols
        .iter()
        .map(|spec| job_for(spec, &batch))
        .collect::<Result<Vec<_>>>()?;

    info!(
        symbols = jobs.len(),
        root = %settings.root().display(),
        %start,
        %end,
        "starting partition batch"
    );

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(jobs.len() as u64)
    };
    progress.set_style(progress_style());
    progress.set_prefix("partition");

    let root = settings.root().to_path_buf();
    let policy = batch.policy;
    let results: Vec<(PartitionKey, Result<Outcome>)> = stream::iter(jobs)
        .map(|job| {
            let calendar = Arc::clone(&calendar);
            let root = root.clone();
            let progress = progress.clone();
            async move {
                let key = job.key.clone();
                progress.set_message(key.to_string());
                let result = tokio::task::spawn_blocking(move || {
                    partition_one(&job, &root, &calendar, policy, start, end)
                })
                .await
                .context("Partition worker panicked")
                .and_then(|r| r);
                progress.inc(1);
                (key, result)
            }
        })
        .buffer_unordered(batch.parallel.max(1))
        .collect()
        .await;
    progress.finish_and_clear();

    report(&results, quiet)
}

/// Builds the job for `SYMBOL` or `SYMBOL:CONTRACT`.
fn job_for(spec: &str, batch: &Batch) -> Result<Job> {
    let (symbol, contract) = match spec.split_once(':') {
        Some((symbol, contract)) => (symbol, Some(contract.to_string())),
        None => (spec, None),
    };
    let key = PartitionKey::new(
        batch.group,
        batch.source,
        &batch.exchange,
        symbol,
        contract,
    )
    .with_context(|| format!("Invalid symbol '{spec}'"))?;

    Ok(Job {
        input: input_path(&batch.input_dir, &key),
        key,
    })
}

/// Raw input file of a series: `<dir>/<symbol><contract>.tks`.
fn input_path(dir: &Path, key: &PartitionKey) -> PathBuf {
    dir.join(format!(
        "{}{}.{TICK_FILE_EXTENSION}",
        key.symbol(),
        key.contract().unwrap_or_default()
    ))
}

fn partition_one(
    job: &Job,
    root: &Path,
    calendar: &TradingCalendar,
    policy: WritePolicy,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Outcome> {
    let mut source = read_ticks(&job.input)?;

    let writer = PartitionWriter::new(root, calendar).with_policy(policy);
    match writer.partition(&job.key, &mut source.ticks, start, end) {
        Ok(summary) => Ok(Outcome::Written {
            summary,
            rejected: source.rejected,
        }),
        Err(PartitionError::NoTicks { .. }) => {
            warn!(symbol = %job.key, input = %job.input.display(), "no ticks in input, skipping");
            Ok(Outcome::Skipped(format!(
                "no ticks in {} ({} malformed lines)",
                job.input.display(),
                source.rejected.len()
            )))
        }
        Err(error) => {
            let written = error.written().cloned();
            Ok(Outcome::Failed {
                error,
                written,
                rejected: source.rejected,
            })
        }
    }
}

/// Prints the batch summary and fails if any symbol failed.
///
/// The failure list is printed even in quiet mode.
fn report(results: &[(PartitionKey, Result<Outcome>)], quiet: bool) -> Result<()> {
    let mut written = 0;
    let mut skipped = 0;
    let mut days = 0;
    let mut rows = 0;
    let mut failures = Vec::new();

    for (key, result) in results {
        match result {
            Ok(Outcome::Written { summary, rejected }) => {
                written += 1;
                days += summary.days_written;
                rows += summary.rows_written;
                if !quiet {
                    println!(
                        "  {key}: {} days, {} rows, {} duplicates dropped",
                        summary.days_written, summary.rows_written, summary.duplicates_removed
                    );
                    for line in rejected {
                        println!("    skipped {line}");
                    }
                }
            }
            Ok(Outcome::Skipped(reason)) => {
                skipped += 1;
                if !quiet {
                    println!("  {key}: skipped, {reason}");
                }
            }
            Ok(Outcome::Failed {
                error,
                written: partial,
                rejected,
            }) => {
                if let Some(partial) = partial {
                    days += partial.days_written;
                    rows += partial.rows_written;
                }
                error!(symbol = %key, error = %error, "partition failed");
                failures.push(failure_lines(key, &error.to_string(), partial.as_ref(), rejected));
            }
            Err(e) => {
                error!(symbol = %key, error = %format!("{e:#}"), "partition failed");
                failures.push(failure_lines(key, &format!("{e:#}"), None, &[]));
            }
        }
    }

    if !quiet {
        println!("\nPartition complete:");
        println!("  Written: {written} symbols, {days} days, {rows} rows");
        if skipped > 0 {
            println!("  Skipped: {skipped}");
        }
    }

    if !failures.is_empty() {
        println!("  Failed: {}", failures.len());
        for (i, lines) in failures.iter().enumerate() {
            println!("    {}: {}", i + 1, lines.join("\n       "));
        }
        bail!("{} out of {} symbols failed", failures.len(), results.len());
    }
    Ok(())
}

/// Describes one failed symbol: the error, any days already on disk and the
/// malformed input lines.
fn failure_lines(
    key: &PartitionKey,
    error: &str,
    written: Option<&PartitionSummary>,
    rejected: &[LineError],
) -> Vec<String> {
    let mut lines = vec![format!("{key}: {error}")];
    if let Some(summary) = written {
        lines.push(format!(
            "written before the failure: {} days, {} rows",
            summary.days_written, summary.rows_written
        ));
        lines.extend(summary.files.iter().map(|f| format!("  {}", f.display())));
    }
    lines.extend(rejected.iter().map(|line| format!("skipped {line}")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn batch(dir: &Path, symbols: &[&str]) -> Batch {
        Batch {
            symbols: symbols.iter().map(ToString::to_string).collect(),
            input_dir: dir.to_path_buf(),
            group: AssetGroup::Futures,
            source: Source::Ib,
            exchange: "nymex".to_string(),
            start: None,
            end: None,
            policy: WritePolicy::Replace,
            parallel: 2,
        }
    }

    #[test]
    fn test_job_for_contract() {
        let dir = TempDir::new().unwrap();
        let batch = batch(dir.path(), &[]);

        let job = job_for("CL:201201", &batch).unwrap();
        assert_eq!(job.key.contract(), Some("201201"));
        assert_eq!(job.input, dir.path().join("CL201201.tks"));

        let job = job_for("CL", &batch).unwrap();
        assert_eq!(job.input, dir.path().join("CL.tks"));

        assert!(job_for("../CL", &batch).is_err());
    }

    #[tokio::test]
    async fn test_batch_continues_past_failed_symbol() {
        let dir = TempDir::new().unwrap();
        let holidays = dir.path().join("holidays.list");
        fs::write(&holidays, "2011-12-26\n").unwrap();
        fs::write(
            dir.path().join("CL201201.tks"),
            "1322746200.0 99.0 99.5 98.5 99.2 10 2 99.1 0\n",
        )
        .unwrap();
        fs::write(dir.path().join("NG201201.tks"), "").unwrap();

        let settings = Settings::resolve(Some(dir.path().join("plant")), Some(holidays));
        let batch = batch(dir.path(), &["CL:201201", "NG:201201", "HO:201201"]);

        // HO has no input file, so the batch reports a failure.
        let result = partition(batch, &settings, true).await;
        assert!(result.is_err());

        let written = dir
            .path()
            .join("plant/futures/ib/nymex/CL/201201/2011/12/01/CL.tks");
        assert!(written.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_keeps_written_days_and_rejected_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("CL201201.tks"),
            "1322697600.0 99.0 99.5 98.5 99.2 10 2 99.1 0\n\
             not a tick\n\
             1322784000.0 99.2 99.6 99.0 99.4 12 3 99.3 0\n",
        )
        .unwrap();

        let root = dir.path().join("plant");
        let batch = batch(dir.path(), &["CL:201201"]);
        let job = job_for("CL:201201", &batch).unwrap();

        // 2011-12-02 cannot be created as a directory.
        let second = NaiveDate::from_ymd_opt(2011, 12, 2).unwrap();
        let blocked = job.key.day_dir(&root, second);
        fs::create_dir_all(blocked.parent().unwrap()).unwrap();
        fs::write(&blocked, "").unwrap();

        let calendar = TradingCalendar::weekdays_only();
        let outcome = partition_one(
            &job,
            &root,
            &calendar,
            WritePolicy::Replace,
            NaiveDate::MIN,
            second,
        )
        .unwrap();

        let Outcome::Failed {
            written, rejected, ..
        } = &outcome
        else {
            panic!("expected a failure, got {outcome:?}");
        };
        let written = written.as_ref().unwrap();
        assert_eq!(written.days_written, 1);
        assert!(written.files[0].is_file());
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].line, 2);

        let results = vec![(job.key.clone(), Ok(outcome))];
        assert!(report(&results, true).is_err());
    }

    #[test]
    fn test_failure_lines_itemise_partial_work() {
        let key = PartitionKey::new(AssetGroup::Futures, Source::Ib, "nymex", "CL", None).unwrap();
        let summary = PartitionSummary {
            days_written: 1,
            rows_written: 5,
            files: vec![PathBuf::from("/plant/CL.tks")],
            ..PartitionSummary::default()
        };

        let lines = failure_lines(&key, "disk full", Some(&summary), &[]);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("disk full"));
        assert!(lines[1].contains("1 days, 5 rows"));
    }
}
