//! Integer, double and logical collectors.

use crate::collectors::{Collect, Column};
use crate::primitives::{parse_double, parse_int};
use crate::token::Token;
use crate::warnings::Warnings;

/// Accept `T`/`F` (case-sensitive), `TRUE`/`FALSE` (case-insensitive) and,
/// when `numeric_bools` is set, bare `1`/`0`.
pub(crate) fn parse_logical(content: &[u8], numeric_bools: bool) -> Option<bool> {
    match content {
        b"T" => Some(true),
        b"F" => Some(false),
        b"1" if numeric_bools => Some(true),
        b"0" if numeric_bools => Some(false),
        _ if content.eq_ignore_ascii_case(b"TRUE") => Some(true),
        _ if content.eq_ignore_ascii_case(b"FALSE") => Some(false),
        _ => None,
    }
}

/// Accumulates 32-bit integers.
#[derive(Debug, Default)]
pub struct IntegerCollector {
    out: Vec<Option<i32>>,
}

impl IntegerCollector {
    /// Create an empty integer collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collect for IntegerCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = parse_int(content);
                if parsed.is_none() {
                    warnings.add(*row, *col, "an integer", String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Integer(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

/// Accumulates 64-bit floats, honoring the locale decimal mark.
#[derive(Debug)]
pub struct DoubleCollector {
    out: Vec<Option<f64>>,
    decimal_mark: u8,
}

impl DoubleCollector {
    /// Create an empty double collector using `decimal_mark`.
    #[must_use]
    pub fn new(decimal_mark: u8) -> Self {
        Self { out: Vec::new(), decimal_mark }
    }
}

impl Collect for DoubleCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = parse_double(self.decimal_mark, content);
                if parsed.is_none() {
                    warnings.add(*row, *col, "a double", String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Double(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

/// Accumulates booleans.
#[derive(Debug)]
pub struct LogicalCollector {
    out: Vec<Option<bool>>,
    numeric_bools: bool,
}

impl LogicalCollector {
    /// Create an empty logical collector; `numeric_bools` additionally
    /// accepts bare `1`/`0`.
    #[must_use]
    pub fn new(numeric_bools: bool) -> Self {
        Self { out: Vec::new(), numeric_bools }
    }
}

impl Collect for LogicalCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let parsed = parse_logical(content, self.numeric_bools);
                if parsed.is_none() {
                    warnings.add(*row, *col, "T/F/TRUE/FALSE", String::from_utf8_lossy(content));
                }
                parsed
            }
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Logical(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}
