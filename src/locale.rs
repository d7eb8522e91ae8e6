//! Locale tables used by the date/time parser and the double parser.

use serde::{Deserialize, Serialize};

/// Month names, AM/PM words, decimal mark and default time zone.
///
/// Immutable after construction. Name matching is a longest
/// case-insensitive prefix match, so the lists may be ordered freely even
/// when one name is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    /// Full month names, January first (length 12).
    pub months: Vec<String>,
    /// Abbreviated month names, January first (length 12).
    pub months_abbrev: Vec<String>,
    /// AM and PM words, in that order (length 2).
    pub am_pm: Vec<String>,
    /// Decimal mark byte for fractional numbers.
    pub decimal_mark: u8,
    /// Default time-zone identifier for parsed date-times.
    pub tz: String,
}

impl LocaleInfo {
    /// The English locale with `.` decimal mark and UTC default zone.
    #[must_use]
    pub fn english() -> Self {
        Self {
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            months_abbrev: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            am_pm: vec!["AM".to_string(), "PM".to_string()],
            decimal_mark: b'.',
            tz: "UTC".to_string(),
        }
    }
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self::english()
    }
}
