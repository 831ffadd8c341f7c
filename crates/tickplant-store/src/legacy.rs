//! Conversion of legacy `YYYY-MM-DD HH:MM:SS ...` tick files.

use std::fs;
use std::path::Path;

use tickplant_types::Tick;
use tracing::warn;

use crate::{LineError, SourceReadError, TickFile};

/// Parses legacy tick file text into ticks in the current column order.
///
/// Blank lines are ignored and malformed lines are reported the same way
/// [`parse_ticks`](crate::parse_ticks) reports them.
#[must_use]
pub fn parse_legacy_ticks(content: &str) -> TickFile {
    let mut file = TickFile::default();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match Tick::parse_legacy_line(line) {
            Ok(tick) => file.ticks.push(tick),
            Err(error) => file.rejected.push(LineError {
                line: index + 1,
                error,
            }),
        }
    }

    file
}

/// Reads and parses a legacy tick file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_legacy_ticks(path: impl AsRef<Path>) -> Result<TickFile, SourceReadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SourceReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file = parse_legacy_ticks(&content);
    if !file.is_clean() {
        warn!(
            path = %path.display(),
            rejected = file.rejected.len(),
            "legacy file has malformed lines"
        );
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_ticks;

    #[test]
    fn test_convert_legacy_file() {
        let content = "\
2011-12-01 13:30:00 25.5 25.75 25.25 25.6 1200 25.55 0 14
2011-12-01\t13:31:00\t25.6\t25.8\t25.5\t25.7\t900\t25.65\t1\t9

2011-12-01 13:32 25.6 25.8 25.5 25.7 900 25.65 1 9
";
        let file = parse_legacy_ticks(content);
        assert_eq!(file.ticks.len(), 2);
        assert_eq!(file.rejected.len(), 1);
        assert_eq!(file.rejected[0].line, 4);

        let mut output = Vec::new();
        write_ticks(&file.ticks, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1322746200.0 25.5 25.75 25.25 25.6 1200 14 25.55 0\n\
             1322746260.0 25.6 25.8 25.5 25.7 900 9 25.65 1\n"
        );
    }
}
