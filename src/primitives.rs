//! Low-level numeric field parsers.
//!
//! These parse a complete byte subrange or fail: no leading whitespace, no
//! trailing junk. The double parser honors a configurable decimal mark,
//! which is why it is hand-rolled rather than delegated to `str::parse`.

/// Parse an optionally signed decimal integer occupying the whole range.
///
/// Fails on empty input, a bare sign, any non-digit byte, or overflow of
/// `i32`.
#[must_use]
pub fn parse_int(bytes: &[u8]) -> Option<i32> {
    if bytes.is_empty() {
        return None;
    }
    let (negative, mut i) = match bytes[0] {
        b'-' => (true, 1),
        b'+' => (false, 1),
        _ => (false, 0),
    };
    if i == bytes.len() {
        return None;
    }
    let mut value: i64 = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
        i += 1;
    }
    if negative {
        value = -value;
    }
    i32::try_from(value).ok()
}

/// Parse a floating-point number occupying the whole range.
///
/// Grammar: `[sign] digits [mark digits] [e|E [sign] digits]`, where `mark`
/// is the locale's decimal byte. At least one digit must appear before the
/// exponent. The words `Inf`, `Infinity` and `NaN` are accepted
/// case-insensitively, with an optional sign.
#[must_use]
pub fn parse_double(decimal_mark: u8, bytes: &[u8]) -> Option<f64> {
    if bytes.is_empty() {
        return None;
    }
    let (negative, start) = match bytes[0] {
        b'-' => (true, 1),
        b'+' => (false, 1),
        _ => (false, 0),
    };
    let rest = &bytes[start..];
    if rest.is_empty() {
        return None;
    }

    if rest.eq_ignore_ascii_case(b"inf") || rest.eq_ignore_ascii_case(b"infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    if rest.eq_ignore_ascii_case(b"nan") {
        return Some(f64::NAN);
    }

    let mut i = 0;
    let mut mantissa: f64 = 0.0;
    let mut scale: i32 = 0;
    let mut any_digits = false;

    while i < rest.len() && rest[i].is_ascii_digit() {
        mantissa = mantissa * 10.0 + f64::from(rest[i] - b'0');
        any_digits = true;
        i += 1;
    }

    if i < rest.len() && rest[i] == decimal_mark {
        i += 1;
        while i < rest.len() && rest[i].is_ascii_digit() {
            mantissa = mantissa * 10.0 + f64::from(rest[i] - b'0');
            scale -= 1;
            any_digits = true;
            i += 1;
        }
    }

    if !any_digits {
        return None;
    }

    if i < rest.len() && (rest[i] == b'e' || rest[i] == b'E') {
        i += 1;
        let exp_negative = match rest.get(i) {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };
        let mut exp: i32 = 0;
        let mut exp_digits = false;
        while i < rest.len() && rest[i].is_ascii_digit() {
            exp = exp.saturating_mul(10).saturating_add(i32::from(rest[i] - b'0'));
            exp_digits = true;
            i += 1;
        }
        if !exp_digits {
            return None;
        }
        scale += if exp_negative { -exp } else { exp };
    }

    if i != rest.len() {
        return None;
    }

    let mut value = mantissa * 10f64.powi(scale);
    if negative {
        value = -value;
    }
    Some(value)
}

/// Consume up to `n` leading digit bytes from `bytes`.
///
/// Returns the parsed value and the number of bytes consumed; fails when the
/// range does not start with a digit. Signs are rejected by construction.
#[must_use]
pub fn parse_digits(bytes: &[u8], n: usize) -> Option<(i32, usize)> {
    let mut value: i32 = 0;
    let mut consumed = 0;
    while consumed < n && consumed < bytes.len() && bytes[consumed].is_ascii_digit() {
        value = value.checked_mul(10)?.checked_add(i32::from(bytes[consumed] - b'0'))?;
        consumed += 1;
    }
    if consumed == 0 {
        return None;
    }
    Some((value, consumed))
}
