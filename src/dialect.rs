//! Tokenization dialect: the delimiter/quote/escape/NA/comment rules that
//! determine how a byte range is cut into fields.

use serde::{Deserialize, Serialize};

/// Immutable configuration for the delimited tokenizer.
///
/// The default dialect is standard CSV: comma-delimited, double-quoted,
/// doubled-quote escapes, `NA` as the missing marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Field delimiter byte.
    pub delim: u8,
    /// Quote byte opening and closing quoted fields.
    pub quote: u8,
    /// Whether `\` escapes the next byte inside quoted fields.
    pub escape_backslash: bool,
    /// Whether a doubled quote inside a quoted field is a literal quote.
    pub escape_double: bool,
    /// Field contents that denote a missing value (byte-exact match).
    pub na: Vec<String>,
    /// Comment prefix; empty disables comment handling.
    pub comment: String,
    /// Trim ASCII whitespace around unquoted fields.
    pub trim_ws: bool,
    /// Number of leading lines to skip before tokenizing.
    pub skip: usize,
    /// Whether rows with no content at all are dropped rather than emitted.
    pub skip_empty_rows: bool,
    /// Whether a quoted field matching an NA marker counts as missing.
    pub quoted_na: bool,
    /// Whether the logical collector accepts bare `1`/`0`.
    pub numeric_bools: bool,
}

impl Dialect {
    /// Standard CSV: `,` delimiter, `"` quote, doubled-quote escapes.
    #[must_use]
    pub fn csv() -> Self {
        Self {
            delim: b',',
            quote: b'"',
            escape_backslash: false,
            escape_double: true,
            na: vec!["NA".to_string()],
            comment: String::new(),
            trim_ws: true,
            skip: 0,
            skip_empty_rows: true,
            quoted_na: true,
            numeric_bools: true,
        }
    }

    /// Tab-separated values: like CSV with a `\t` delimiter and no trimming.
    #[must_use]
    pub fn tsv() -> Self {
        Self {
            delim: b'\t',
            trim_ws: false,
            ..Self::csv()
        }
    }

    /// Whether `field` matches one of the configured NA markers byte-exactly.
    #[must_use]
    pub fn is_na(&self, field: &[u8]) -> bool {
        self.na.iter().any(|na| na.as_bytes() == field)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::csv()
    }
}
