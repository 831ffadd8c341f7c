//! Plant root and holiday list resolution.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tickplant_lib::TradingCalendar;
use tracing::debug;

/// File name of the holiday list under the config directory.
const HOLIDAYS_FILE: &str = "holidays.list";

/// Resolved locations for one run.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) root: PathBuf,
    pub(crate) holidays: PathBuf,
}

impl Settings {
    /// Uses the flag or environment value when given, otherwise the
    /// platform data and config directories:
    /// - Linux: `~/.local/share/tickplant/plant` and `~/.config/tickplant/holidays.list`
    /// - macOS: `~/Library/Application Support/tickplant/...`
    ///
    /// Falls back to `~/.tickplant/` if the platform location cannot be
    /// determined.
    pub(crate) fn resolve(root: Option<PathBuf>, holidays: Option<PathBuf>) -> Self {
        let dirs = ProjectDirs::from("", "", "tickplant");

        let root = root.unwrap_or_else(|| {
            dirs.as_ref()
                .map_or_else(fallback_dir, |d| d.data_dir().to_path_buf())
                .join("plant")
        });
        let holidays = holidays.unwrap_or_else(|| {
            dirs.as_ref()
                .map_or_else(fallback_dir, |d| d.config_dir().to_path_buf())
                .join(HOLIDAYS_FILE)
        });

        debug!(root = %root.display(), holidays = %holidays.display(), "resolved settings");
        Self { root, holidays }
    }

    /// Loads the trading calendar. A missing or malformed holiday list
    /// aborts the run.
    pub(crate) fn calendar(&self) -> Result<TradingCalendar> {
        TradingCalendar::load(&self.holidays).with_context(|| {
            format!(
                "Failed to load holiday list (set --holidays or TICKPLANT_HOLIDAYS): {}",
                self.holidays.display()
            )
        })
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }
}

fn fallback_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".tickplant")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let settings =
            Settings::resolve(Some("/data/plant".into()), Some("/etc/holidays.list".into()));

        assert_eq!(settings.root(), Path::new("/data/plant"));
        assert_eq!(settings.holidays, PathBuf::from("/etc/holidays.list"));
    }

    #[test]
    fn test_missing_holiday_list_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings =
            Settings::resolve(Some(dir.path().into()), Some(dir.path().join("none.list")));

        assert!(settings.calendar().is_err());
    }

    #[test]
    fn test_calendar_loads() {
        let dir = tempfile::TempDir::new().unwrap();
        let list = dir.path().join(HOLIDAYS_FILE);
        std::fs::write(&list, "# US\n2011-12-26\n").unwrap();

        let settings = Settings::resolve(Some(dir.path().into()), Some(list));
        assert_eq!(settings.calendar().unwrap().len(), 1);
    }
}
