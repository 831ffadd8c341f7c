//! Convert command: legacy tick files to the current column layout.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tickplant_lib::{read_legacy_ticks, write_ticks};

/// Convert `input` and write the result to `output` or stdout.
pub(crate) fn convert(input: &Path, output: Option<&Path>, quiet: bool) -> Result<()> {
    let file = read_legacy_ticks(input)?;

    for rejected in &file.rejected {
        eprintln!("{}: skipped {rejected}", input.display());
    }
    if file.ticks.is_empty() && !file.rejected.is_empty() {
        bail!("No convertible lines in {}", input.display());
    }

    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ticks(&file.ticks, BufWriter::new(out))?;
            if !quiet {
                eprintln!("Written: {} ({} ticks)", path.display(), file.ticks.len());
            }
        }
        None => write_ticks(&file.ticks, io::stdout().lock())?,
    }

    Ok(())
}
