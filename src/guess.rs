//! Narrowest-fit column type guessing.
//!
//! Works on a character column of the first N rows: the guessed type is the
//! first candidate, narrowest first, whose parser accepts every non-missing
//! entry. Empty strings and configured NA markers count as missing.

use crate::collectors::primitive::parse_logical;
use crate::collectors::ColumnType;
use crate::datetime::DateTimeParser;
use crate::dialect::Dialect;
use crate::locale::LocaleInfo;
use crate::primitives::{parse_double, parse_int};

/// Guess the narrowest type for one raw column.
///
/// Bare `1`/`0` never count as logical here, whatever the dialect says, so
/// numeric columns guess as integer rather than logical; the §8 guarantee
/// (a collector of the guessed type parses every entry) still holds because
/// the logical collector accepts a superset.
#[must_use]
pub fn guess_column_type(
    values: &[Option<String>],
    dialect: &Dialect,
    locale: &LocaleInfo,
) -> ColumnType {
    let entries: Vec<&[u8]> = values
        .iter()
        .flatten()
        .map(|s| s.as_bytes())
        .filter(|b| !b.is_empty() && !dialect.is_na(b))
        .collect();

    if entries.iter().all(|b| parse_logical(b, false).is_some()) {
        return ColumnType::Logical;
    }
    if entries.iter().all(|b| parse_int(b).is_some()) {
        return ColumnType::Integer;
    }
    if entries
        .iter()
        .all(|b| parse_double(locale.decimal_mark, b).is_some())
    {
        return ColumnType::Double;
    }

    let mut parser = DateTimeParser::new(locale);
    if entries
        .iter()
        .all(|b| parser.parse_iso8601(b) && !parser.has_time() && parser.make_date().is_some())
    {
        return ColumnType::Date;
    }
    if entries
        .iter()
        .all(|b| parser.parse_iso8601(b) && parser.has_time() && parser.make_datetime().is_some())
    {
        return ColumnType::Datetime;
    }
    if entries.iter().all(|b| is_time(&mut parser, b)) {
        return ColumnType::Time;
    }

    ColumnType::Character
}

fn is_time(parser: &mut DateTimeParser<'_>, bytes: &[u8]) -> bool {
    for format in ["%H:%M:%S", "%H:%M"] {
        if parser.parse_format(format, bytes).unwrap_or(false) && parser.make_time().is_some() {
            return true;
        }
    }
    false
}
