//! Date, datetime and time collectors.
//!
//! Each delegates to [`DateTimeParser`] with a preconfigured format string;
//! an empty format selects the ISO-8601 fast path (dates and datetimes) or
//! `%H:%M:%S` (times). Format strings are validated at construction, so a
//! malformed format is a fatal spec error rather than a per-field surprise.

use crate::collectors::{Collect, Column};
use crate::datetime::{validate_format, DateTimeParser};
use crate::error::ReadError;
use crate::locale::LocaleInfo;
use crate::token::Token;
use crate::warnings::Warnings;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Accumulates calendar dates.
#[derive(Debug)]
pub struct DateCollector {
    out: Vec<Option<NaiveDate>>,
    format: String,
    locale: LocaleInfo,
}

impl DateCollector {
    /// Create a date collector; an empty `format` uses the ISO-8601 fast
    /// path.
    pub fn new(format: String, locale: LocaleInfo) -> Result<Self, ReadError> {
        validate_format(&format)?;
        Ok(Self { out: Vec::new(), format, locale })
    }

    fn parse(&self, content: &[u8]) -> Option<NaiveDate> {
        let mut parser = DateTimeParser::new(&self.locale);
        let matched = if self.format.is_empty() {
            parser.parse_iso8601(content)
        } else {
            parser.parse_format(&self.format, content).unwrap_or(false)
        };
        if matched {
            parser.make_date()
        } else {
            None
        }
    }
}

impl Collect for DateCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = self.parse(content);
                if parsed.is_none() {
                    warnings.add(*row, *col, expected(&self.format, "date in ISO8601 format"),
                        String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Date(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

/// Accumulates instants in UTC.
#[derive(Debug)]
pub struct DatetimeCollector {
    out: Vec<Option<DateTime<Utc>>>,
    format: String,
    locale: LocaleInfo,
}

impl DatetimeCollector {
    /// Create a datetime collector; an empty `format` uses the ISO-8601
    /// fast path.
    pub fn new(format: String, locale: LocaleInfo) -> Result<Self, ReadError> {
        validate_format(&format)?;
        Ok(Self { out: Vec::new(), format, locale })
    }

    fn parse(&self, content: &[u8]) -> Option<DateTime<Utc>> {
        let mut parser = DateTimeParser::new(&self.locale);
        let matched = if self.format.is_empty() {
            parser.parse_iso8601(content)
        } else {
            parser.parse_format(&self.format, content).unwrap_or(false)
        };
        if matched {
            parser.make_datetime()
        } else {
            None
        }
    }
}

impl Collect for DatetimeCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = self.parse(content);
                if parsed.is_none() {
                    warnings.add(*row, *col,
                        expected(&self.format, "date time in ISO8601 format"),
                        String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Datetime(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

/// Accumulates times of day.
#[derive(Debug)]
pub struct TimeCollector {
    out: Vec<Option<NaiveTime>>,
    format: String,
    locale: LocaleInfo,
}

impl TimeCollector {
    /// Create a time collector; an empty `format` means `%H:%M:%S`.
    pub fn new(format: String, locale: LocaleInfo) -> Result<Self, ReadError> {
        let format = if format.is_empty() {
            DEFAULT_TIME_FORMAT.to_string()
        } else {
            format
        };
        validate_format(&format)?;
        Ok(Self { out: Vec::new(), format, locale })
    }

    fn parse(&self, content: &[u8]) -> Option<NaiveTime> {
        let mut parser = DateTimeParser::new(&self.locale);
        if parser.parse_format(&self.format, content).unwrap_or(false) {
            parser.make_time()
        } else {
            None
        }
    }
}

impl Collect for TimeCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = self.parse(content);
                if parsed.is_none() {
                    warnings.add(*row, *col, format!("time like {}", self.format),
                        String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Time(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

fn expected(format: &str, fallback: &str) -> String {
    if format.is_empty() {
        fallback.to_string()
    } else {
        format!("date like {format}")
    }
}
