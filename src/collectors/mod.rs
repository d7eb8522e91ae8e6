//! Typed column accumulators.
//!
//! A collector consumes tokens for one column, parses them into a typed
//! output vector, and hands the finished vector over at the end of the
//! parse. Parse failures are recorded as warnings and stored as the missing
//! sentinel (`None`); they never abort the stream.

pub mod character;
pub mod factor;
pub mod primitive;
pub mod temporal;

pub use character::CharacterCollector;
pub use factor::FactorCollector;
pub use primitive::{DoubleCollector, IntegerCollector, LogicalCollector};
pub use temporal::{DateCollector, DatetimeCollector, TimeCollector};

use crate::dialect::Dialect;
use crate::error::ReadError;
use crate::locale::LocaleInfo;
use crate::token::Token;
use crate::warnings::Warnings;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finalized output column. Missing entries are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// UTF-8 text (lossily decoded when the input was not valid UTF-8).
    Character(Vec<Option<String>>),
    /// 32-bit integers.
    Integer(Vec<Option<i32>>),
    /// 64-bit floats.
    Double(Vec<Option<f64>>),
    /// Booleans.
    Logical(Vec<Option<bool>>),
    /// Calendar dates.
    Date(Vec<Option<NaiveDate>>),
    /// Instants in UTC.
    Datetime(Vec<Option<DateTime<Utc>>>),
    /// Times of day.
    Time(Vec<Option<NaiveTime>>),
    /// Indices into a levels list.
    Factor {
        /// Per-row level index, `None` when missing.
        indices: Vec<Option<u32>>,
        /// The level strings the indices refer to.
        levels: Vec<String>,
    },
}

impl Column {
    /// Number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Character(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Double(v) => v.len(),
            Column::Logical(v) => v.len(),
            Column::Date(v) => v.len(),
            Column::Datetime(v) => v.len(),
            Column::Time(v) => v.len(),
            Column::Factor { indices, .. } => indices.len(),
        }
    }

    /// Whether the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The type tag of this column.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Character(_) => ColumnType::Character,
            Column::Integer(_) => ColumnType::Integer,
            Column::Double(_) => ColumnType::Double,
            Column::Logical(_) => ColumnType::Logical,
            Column::Date(_) => ColumnType::Date,
            Column::Datetime(_) => ColumnType::Datetime,
            Column::Time(_) => ColumnType::Time,
            Column::Factor { .. } => ColumnType::Factor,
        }
    }
}

/// Runtime type tag for columns and guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Boolean.
    Logical,
    /// 32-bit integer.
    Integer,
    /// 64-bit float.
    Double,
    /// Calendar date.
    Date,
    /// Instant in UTC.
    Datetime,
    /// Time of day.
    Time,
    /// Text.
    Character,
    /// Index into a levels list.
    Factor,
    /// Column omitted from the output.
    Skip,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Logical => "logical",
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Time => "time",
            ColumnType::Character => "character",
            ColumnType::Factor => "factor",
            ColumnType::Skip => "skip",
        };
        f.write_str(name)
    }
}

/// Per-column descriptor supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnSpec {
    /// Collect text as-is.
    Character,
    /// Parse 32-bit integers.
    Integer,
    /// Parse 64-bit floats with the locale decimal mark.
    Double,
    /// Parse booleans.
    Logical,
    /// Parse calendar dates; an empty format means the ISO-8601 fast path.
    Date {
        /// strptime-style format string.
        #[serde(default)]
        format: String,
    },
    /// Parse instants; an empty format means the ISO-8601 fast path.
    Datetime {
        /// strptime-style format string.
        #[serde(default)]
        format: String,
    },
    /// Parse times of day; an empty format means `%H:%M:%S`.
    Time {
        /// strptime-style format string.
        #[serde(default)]
        format: String,
    },
    /// Look fields up in a fixed levels list.
    Factor {
        /// The allowed level strings, in output order.
        levels: Vec<String>,
        /// Append unknown values as new levels instead of warning.
        #[serde(default)]
        include_unknown: bool,
    },
    /// Drop this column from the output.
    Skip,
}

/// A typed column accumulator.
///
/// The driver owns a boxed collector per declared column, grows them in
/// lockstep, dispatches tokens by column index, and finalizes them at EOF.
pub trait Collect {
    /// Reallocate the output to length `n`, preserving existing entries up
    /// to `min(old, n)`; new slots hold the missing sentinel.
    fn resize(&mut self, n: usize);

    /// Parse `token` into slot `i`. On failure, record a warning and store
    /// the missing sentinel.
    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings);

    /// Transfer ownership of the finished column out of the collector.
    fn finalize(self: Box<Self>) -> Column;

    /// Current target length.
    fn len(&self) -> usize;

    /// Whether this column is omitted from the output.
    fn skip(&self) -> bool {
        false
    }
}

/// Collector that stores nothing.
pub struct SkipCollector;

impl Collect for SkipCollector {
    fn resize(&mut self, _n: usize) {}

    fn set_value(&mut self, _i: usize, _token: &Token<'_>, _warnings: &mut Warnings) {}

    fn finalize(self: Box<Self>) -> Column {
        Column::Character(Vec::new())
    }

    fn len(&self) -> usize {
        0
    }

    fn skip(&self) -> bool {
        true
    }
}

/// Build the collector for one column spec.
///
/// Fails when a date/time format string is malformed, so per-field parsing
/// never hits a fatal format error.
pub fn collector_for(
    spec: &ColumnSpec,
    dialect: &Dialect,
    locale: &LocaleInfo,
) -> Result<Box<dyn Collect>, ReadError> {
    Ok(match spec {
        ColumnSpec::Character => Box::new(CharacterCollector::new()),
        ColumnSpec::Integer => Box::new(IntegerCollector::new()),
        ColumnSpec::Double => Box::new(DoubleCollector::new(locale.decimal_mark)),
        ColumnSpec::Logical => Box::new(LogicalCollector::new(dialect.numeric_bools)),
        ColumnSpec::Date { format } => {
            Box::new(DateCollector::new(format.clone(), locale.clone())?)
        }
        ColumnSpec::Datetime { format } => {
            Box::new(DatetimeCollector::new(format.clone(), locale.clone())?)
        }
        ColumnSpec::Time { format } => {
            Box::new(TimeCollector::new(format.clone(), locale.clone())?)
        }
        ColumnSpec::Factor { levels, include_unknown } => {
            Box::new(FactorCollector::new(levels.clone(), *include_unknown))
        }
        ColumnSpec::Skip => Box::new(SkipCollector),
    })
}
