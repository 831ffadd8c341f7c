//! Partition keys and their mapping onto the plant directory tree.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::KeyError;

/// File extension of partition files.
pub const TICK_FILE_EXTENSION: &str = "tks";

/// Asset group a series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetGroup {
    /// Listed equities.
    Equities,
    /// Exchange traded futures (series carry a contract).
    Futures,
    /// Foreign exchange.
    Fx,
}

impl AssetGroup {
    /// Returns the group as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equities => "equities",
            Self::Futures => "futures",
            Self::Fx => "fx",
        }
    }

    /// Returns all asset groups.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Equities, Self::Futures, Self::Fx]
    }
}

impl std::fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetGroup {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equities" => Ok(Self::Equities),
            "futures" => Ok(Self::Futures),
            "fx" => Ok(Self::Fx),
            _ => Err(KeyError::UnknownGroup(s.to_string())),
        }
    }
}

/// Data source the ticks were acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Interactive Brokers historical bars.
    #[default]
    Ib,
}

impl Source {
    /// Returns the source as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ib => "ib",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Source {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ib" => Ok(Self::Ib),
            _ => Err(KeyError::UnknownSource(s.to_string())),
        }
    }
}

/// Identifies one tick series in the plant.
///
/// A key maps deterministically to
/// `<root>/<group>/<source>/<exchange>/<symbol>[/<contract>]`, and each
/// trading day of the series to `<that>/<YYYY>/<MM>/<DD>/<symbol>.tks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    group: AssetGroup,
    source: Source,
    exchange: String,
    symbol: String,
    contract: Option<String>,
}

impl PartitionKey {
    /// Creates a new key, validating every path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange, symbol or contract is empty,
    /// contains a path separator, or is a relative path component.
    pub fn new(
        group: AssetGroup,
        source: Source,
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        contract: Option<String>,
    ) -> Result<Self, KeyError> {
        let exchange = exchange.into();
        let symbol = symbol.into();
        validate_segment("exchange", &exchange)?;
        validate_segment("symbol", &symbol)?;
        if let Some(contract) = &contract {
            validate_segment("contract", contract)?;
        }

        Ok(Self {
            group,
            source,
            exchange,
            symbol,
            contract,
        })
    }

    /// Returns the asset group.
    #[must_use]
    pub const fn group(&self) -> AssetGroup {
        self.group
    }

    /// Returns the data source.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Returns the exchange.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Returns the symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the futures contract, if any.
    #[must_use]
    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    /// Returns the directory holding every day of this series.
    #[must_use]
    pub fn series_dir(&self, root: &Path) -> PathBuf {
        let mut path = root
            .join(self.group.as_str())
            .join(self.source.as_str())
            .join(&self.exchange)
            .join(&self.symbol);
        if let Some(contract) = &self.contract {
            path.push(contract);
        }
        path
    }

    /// Returns the directory for one day of this series.
    #[must_use]
    pub fn day_dir(&self, root: &Path, date: NaiveDate) -> PathBuf {
        self.series_dir(root)
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
    }

    /// Returns the partition file for one day of this series.
    #[must_use]
    pub fn day_file(&self, root: &Path, date: NaiveDate) -> PathBuf {
        self.day_dir(root, date).join(self.file_name())
    }

    /// Returns the partition file name, `<symbol>.tks`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{TICK_FILE_EXTENSION}", self.symbol)
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.group, self.source, self.exchange, self.symbol)?;
        if let Some(contract) = &self.contract {
            write!(f, "/{contract}")?;
        }
        Ok(())
    }
}

fn validate_segment(component: &'static str, value: &str) -> Result<(), KeyError> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
        || value.chars().any(char::is_whitespace);
    if invalid {
        return Err(KeyError::InvalidSegment {
            component,
            value: value.to_string(),
        });
    }
    Ok(())
}
