//! Reading and writing whitespace-delimited tick files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tickplant_types::Tick;
use tracing::{debug, warn};

use crate::{LineError, SourceReadError};

/// Ticks parsed from one file, plus every line that was rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickFile {
    /// Successfully parsed ticks, in file order.
    pub ticks: Vec<Tick>,
    /// Lines that could not be parsed and were skipped.
    pub rejected: Vec<LineError>,
}

impl TickFile {
    /// Returns true if no line was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parses tick file text.
///
/// Blank lines are ignored. Malformed lines are skipped and recorded in
/// [`TickFile::rejected`] with their 1-based line number.
#[must_use]
pub fn parse_ticks(content: &str) -> TickFile {
    let mut file = TickFile::default();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match Tick::parse_line(line) {
            Ok(tick) => file.ticks.push(tick),
            Err(error) => file.rejected.push(LineError {
                line: index + 1,
                error,
            }),
        }
    }

    file
}

/// Reads and parses a tick file.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Malformed lines are not an
/// error; they are reported in [`TickFile::rejected`].
pub fn read_ticks(path: impl AsRef<Path>) -> Result<TickFile, SourceReadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SourceReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file = parse_ticks(&content);
    for rejected in &file.rejected {
        debug!(path = %path.display(), %rejected, "skipped malformed tick line");
    }
    if !file.is_clean() {
        warn!(
            path = %path.display(),
            rejected = file.rejected.len(),
            parsed = file.ticks.len(),
            "tick file has malformed lines"
        );
    }

    Ok(file)
}

/// Writes ticks one per line in column order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_ticks<W: Write>(ticks: &[Tick], mut writer: W) -> io::Result<()> {
    for tick in ticks {
        writeln!(writer, "{tick}")?;
    }
    writer.flush()
}

/// Sorts ticks by timestamp, keeping the input order of equal timestamps.
pub fn sort_ticks(ticks: &mut [Tick]) {
    ticks.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
}

/// Removes ticks that repeat the timestamp of an earlier tick.
///
/// Expects `ticks` sorted; the first occurrence of each timestamp wins.
/// Returns the number of ticks removed.
pub fn dedup_ticks(ticks: &mut Vec<Tick>) -> usize {
    let before = ticks.len();
    ticks.dedup_by(|next, kept| next.timestamp == kept.timestamp);
    before - ticks.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickplant_types::TickParseError;

    fn tick(ts: f64, close: f64) -> Tick {
        Tick::new(ts, close, close, close, close, 100, 1, close, false)
    }

    #[test]
    fn test_parse_reports_bad_lines() {
        let content = "\
1322746200.0 25.5 25.75 25.25 25.6 1200 14 25.55 0

1322746260.0 25.6 25.8
1322746320.0 25.6 x 25.5 25.7 900 9 25.65 0
1322746380.0 25.7 25.9 25.6 25.8 800 8 25.75 1
";
        let file = parse_ticks(content);

        assert_eq!(file.ticks.len(), 2);
        assert_eq!(file.rejected.len(), 2);
        assert_eq!(file.rejected[0].line, 3);
        assert!(matches!(
            file.rejected[0].error,
            TickParseError::FieldCount { found: 3, .. }
        ));
        assert_eq!(file.rejected[1].line, 4);
        assert!(!file.is_clean());
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_ticks("/nonexistent/AAPL.tks");
        assert!(result.is_err());
    }

    #[test]
    fn test_write_ticks() {
        let ticks = vec![tick(1.0, 2.5), tick(2.0, 3.0)];
        let mut output = Vec::new();

        write_ticks(&ticks, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "1.0 2.5 2.5 2.5 2.5 100 1 2.5 0\n2.0 3.0 3.0 3.0 3.0 100 1 3.0 0\n"
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let mut ticks = vec![tick(3.0, 1.0), tick(1.0, 2.0), tick(3.0, 3.0), tick(2.0, 4.0)];
        sort_ticks(&mut ticks);

        let order: Vec<_> = ticks.iter().map(|t| (t.timestamp, t.close)).collect();
        assert_eq!(order, vec![(1.0, 2.0), (2.0, 4.0), (3.0, 1.0), (3.0, 3.0)]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut ticks = vec![tick(1.0, 1.0), tick(2.0, 2.0), tick(2.0, 9.0), tick(2.0, 8.0)];
        let removed = dedup_ticks(&mut ticks);

        assert_eq!(removed, 2);
        assert_eq!(ticks.len(), 2);
        assert!((ticks[1].close - 2.0).abs() < f64::EPSILON);
    }
}
