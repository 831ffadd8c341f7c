//! Error types for tickplant.

use chrono::NaiveDate;
use thiserror::Error;

use crate::Tick;

/// Error for a single malformed tick line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickParseError {
    /// The line does not hold the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Number of fields a tick line must have.
        expected: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// A field could not be parsed as the expected numeric type.
    #[error("invalid {field} value '{value}'")]
    InvalidField {
        /// Name of the offending column.
        field: &'static str,
        /// The raw text of the field.
        value: String,
    },

    /// The timestamp parsed but is NaN or infinite.
    #[error("non-finite timestamp '{0}'")]
    NonFiniteTimestamp(String),

    /// A legacy `YYYY-MM-DD HH:MM:SS` timestamp could not be parsed.
    #[error("invalid legacy timestamp '{0}'")]
    LegacyTimestamp(String),
}

impl TickParseError {
    pub(crate) fn invalid(index: usize, value: &str) -> Self {
        Self::InvalidField {
            field: Tick::FIELD_NAMES.get(index).copied().unwrap_or("field"),
            value: value.to_string(),
        }
    }
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// A date string is neither `YYYY-MM-DD` nor `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),
}

/// Error for partition keys that cannot be mapped to a safe path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// A path segment is empty or would escape its parent directory.
    #[error("invalid {component} '{value}'")]
    InvalidSegment {
        /// Which key component is invalid.
        component: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Unknown asset group name.
    #[error("unknown asset group '{0}', expected one of: equities, futures, fx")]
    UnknownGroup(String),

    /// Unknown data source name.
    #[error("unknown source '{0}', expected one of: ib")]
    UnknownSource(String),
}
