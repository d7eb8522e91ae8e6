//! Date/time parsing: an ISO-8601 fast path and a format-string
//! interpreter with locale-aware month names, AM/PM words and decimal mark.
//!
//! The parser is a reusable scratch state: bind an input, run one of the
//! parse entry points, then materialize a value with [`make_date`],
//! [`make_datetime`] or [`make_time`].
//!
//! [`make_date`]: DateTimeParser::make_date
//! [`make_datetime`]: DateTimeParser::make_datetime
//! [`make_time`]: DateTimeParser::make_time

use crate::error::ReadError;
use crate::locale::LocaleInfo;
use crate::primitives::parse_digits;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Byte cursor over one date/time field.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_complete(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn consume_char(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn consume_this_char(&mut self, wanted: u8) -> bool {
        if self.peek() == Some(wanted) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn consume_non_digit(&mut self) -> bool {
        match self.peek() {
            Some(b) if !b.is_ascii_digit() => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn consume_non_digits(&mut self) {
        while self.peek().is_some_and(|b| !b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    /// Up to `n` digit bytes; signs are rejected.
    fn consume_integer(&mut self, n: usize) -> Option<i32> {
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            return None;
        }
        let (value, used) = parse_digits(self.rest(), n)?;
        self.advance(used);
        Some(value)
    }

    /// Like `consume_integer`, shifted to 0-indexed (month and day input is
    /// 1-indexed).
    fn consume_integer1(&mut self, n: usize) -> Option<i32> {
        self.consume_integer(n).map(|v| v - 1)
    }

    /// `consume_integer1` accepting one optional leading space that counts
    /// against the width.
    fn consume_integer1_with_space(&mut self, n: usize) -> Option<i32> {
        let n = if self.consume_this_char(b' ') { n - 1 } else { n };
        self.consume_integer1(n)
    }
}

/// Reusable scratch state for date/time parsing.
///
/// Month and day are stored 0-indexed internally; an unset year is the
/// invalid sentinel, so a parse that never saw a year cannot produce a
/// date.
pub struct DateTimeParser<'l> {
    locale: &'l LocaleInfo,
    year: i32,
    mon: i32,
    day: i32,
    hour: i32,
    min: i32,
    sec: i32,
    psec: f64,
    am_pm: i32,
    tz_offset_hours: i32,
    tz_offset_minutes: i32,
    tz_utc: bool,
    tz_name: Option<String>,
    has_time: bool,
}

impl<'l> DateTimeParser<'l> {
    /// Create a parser bound to `locale`.
    #[must_use]
    pub fn new(locale: &'l LocaleInfo) -> Self {
        Self {
            locale,
            year: -1,
            mon: -1,
            day: -1,
            hour: 0,
            min: 0,
            sec: 0,
            psec: 0.0,
            am_pm: -1,
            tz_offset_hours: 0,
            tz_offset_minutes: 0,
            tz_utc: false,
            tz_name: None,
            has_time: false,
        }
    }

    fn reset(&mut self) {
        self.year = -1;
        self.mon = -1;
        self.day = -1;
        self.hour = 0;
        self.min = 0;
        self.sec = 0;
        self.psec = 0.0;
        self.am_pm = -1;
        self.tz_offset_hours = 0;
        self.tz_offset_minutes = 0;
        self.tz_utc = false;
        self.tz_name = None;
        self.has_time = false;
    }

    /// Parse `YYYY[-]MM[-]DD([T ]HH[:MM[:SS[.sss]]])?(Z|±HH[:MM])?`.
    ///
    /// Returns true only when the entire input was consumed.
    pub fn parse_iso8601(&mut self, input: &[u8]) -> bool {
        self.reset();
        let mut cur = Cursor::new(input);

        let Some(year) = cur.consume_integer(4) else {
            return false;
        };
        self.year = year;
        cur.consume_this_char(b'-');
        let Some(mon) = cur.consume_integer1(2) else {
            return false;
        };
        self.mon = mon;
        cur.consume_this_char(b'-');
        let Some(day) = cur.consume_integer1(2) else {
            return false;
        };
        self.day = day;

        if cur.is_complete() {
            return true;
        }

        // The spec requires T, but a space separator is very common.
        let Some(sep) = cur.consume_char() else {
            return false;
        };
        if sep != b'T' && sep != b' ' {
            return false;
        }

        let Some(hour) = cur.consume_integer(2) else {
            return false;
        };
        self.hour = hour;
        self.has_time = true;
        cur.consume_this_char(b':');
        if let Some(min) = cur.consume_integer(2) {
            self.min = min;
        }
        cur.consume_this_char(b':');
        self.consume_seconds(&mut cur, true);

        if cur.is_complete() {
            return true;
        }

        self.tz_utc = true;
        if !self.consume_tz_offset(&mut cur) {
            return false;
        }
        cur.is_complete()
    }

    /// Interpret `format` against `input`.
    ///
    /// Returns `Ok(true)` when the whole input matched, `Ok(false)` on a
    /// value mismatch, and `Err` for malformed format strings (fatal to the
    /// caller, not a data problem).
    pub fn parse_format(&mut self, format: &str, input: &[u8]) -> Result<bool, ReadError> {
        self.reset();
        let mut cur = Cursor::new(input);
        cur.skip_whitespace();
        if !self.apply_format(&mut cur, format.as_bytes())? {
            return Ok(false);
        }
        cur.skip_whitespace();
        Ok(cur.is_complete())
    }

    fn apply_format(&mut self, cur: &mut Cursor<'_>, fmt: &[u8]) -> Result<bool, ReadError> {
        let mut f = 0;
        while f < fmt.len() {
            let fc = fmt[f];

            // Whitespace in the format matches zero or more whitespace.
            if fc.is_ascii_whitespace() {
                cur.skip_whitespace();
                f += 1;
                continue;
            }

            // Any other non-directive byte must match exactly.
            if fc != b'%' {
                if !cur.consume_this_char(fc) {
                    return Ok(false);
                }
                f += 1;
                continue;
            }

            f += 1;
            if f >= fmt.len() {
                return Err(ReadError::TrailingPercent);
            }
            let directive = fmt[f];
            f += 1;

            let matched = match directive {
                b'Y' => cur.consume_integer(4).map(|v| self.year = v).is_some(),
                b'y' => cur
                    .consume_integer(2)
                    .map(|v| self.year = v + if v < 69 { 2000 } else { 1900 })
                    .is_some(),
                b'm' => cur.consume_integer1(2).map(|v| self.mon = v).is_some(),
                b'b' => consume_name(cur, &self.locale.months_abbrev)
                    .map(|i| self.mon = i as i32)
                    .is_some(),
                b'B' => consume_name(cur, &self.locale.months)
                    .map(|i| self.mon = i as i32)
                    .is_some(),
                b'd' => cur.consume_integer1(2).map(|v| self.day = v).is_some(),
                b'e' => cur
                    .consume_integer1_with_space(2)
                    .map(|v| self.day = v)
                    .is_some(),
                b'H' => cur
                    .consume_integer(2)
                    .map(|v| {
                        self.hour = v;
                        self.has_time = true;
                    })
                    .is_some(),
                b'M' => cur.consume_integer(2).map(|v| self.min = v).is_some(),
                b'S' => self.consume_seconds(cur, false),
                b'O' => {
                    if f >= fmt.len() || fmt[f] != b'S' {
                        return Err(ReadError::BadFractionalDirective);
                    }
                    f += 1;
                    self.consume_seconds(cur, true)
                }
                b'p' => consume_name(cur, &self.locale.am_pm)
                    .map(|i| self.am_pm = i as i32)
                    .is_some(),
                b'z' => {
                    self.tz_utc = true;
                    self.consume_tz_offset(cur)
                }
                b'Z' => self.consume_tz_name(cur),
                b'.' => cur.consume_non_digit(),
                b'*' => {
                    cur.consume_non_digits();
                    true
                }
                b'D' => self.apply_format(cur, b"%m/%d/%y")?,
                b'F' => self.apply_format(cur, b"%Y-%m-%d")?,
                b'R' => self.apply_format(cur, b"%H:%M")?,
                b'T' | b'X' => self.apply_format(cur, b"%H:%M:%S")?,
                b'x' => self.apply_format(cur, b"%y/%m/%d")?,
                other => return Err(ReadError::UnsupportedDirective(other as char)),
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Integer seconds with optional fraction, using the locale decimal
    /// mark. The fraction is consumed either way and stored only when
    /// `with_partial` is set.
    fn consume_seconds(&mut self, cur: &mut Cursor<'_>, with_partial: bool) -> bool {
        let rest = cur.rest();
        let mut i = 0;
        let mut whole: i32 = 0;
        let mut any = false;
        while i < rest.len() && rest[i].is_ascii_digit() {
            whole = whole.saturating_mul(10).saturating_add(i32::from(rest[i] - b'0'));
            any = true;
            i += 1;
        }
        if !any {
            return false;
        }

        let mut frac = 0.0;
        if i < rest.len() && rest[i] == self.locale.decimal_mark {
            let mark_at = i;
            i += 1;
            let mut scale = 0.1;
            let mut frac_any = false;
            while i < rest.len() && rest[i].is_ascii_digit() {
                frac += f64::from(rest[i] - b'0') * scale;
                scale *= 0.1;
                frac_any = true;
                i += 1;
            }
            if !frac_any {
                i = mark_at;
            }
        }

        cur.advance(i);
        self.sec = whole;
        if with_partial {
            self.psec = frac;
        }
        true
    }

    /// `Z`, `±HH:MM`, `±HHMM` or `±HH`; the sign is optional.
    fn consume_tz_offset(&mut self, cur: &mut Cursor<'_>) -> bool {
        if cur.consume_this_char(b'Z') {
            return true;
        }
        let mult = match cur.peek() {
            Some(b'-') => {
                cur.advance(1);
                -1
            }
            Some(b'+') => {
                cur.advance(1);
                1
            }
            _ => 1,
        };
        let Some(hours) = cur.consume_integer(2) else {
            return false;
        };
        cur.consume_this_char(b':');
        let minutes = cur.consume_integer(2).unwrap_or(0);
        self.tz_offset_hours = mult * hours;
        self.tz_offset_minutes = mult * minutes;
        true
    }

    /// Whitespace-terminated zone name; fails on an empty name.
    fn consume_tz_name(&mut self, cur: &mut Cursor<'_>) -> bool {
        let rest = cur.rest();
        let mut len = 0;
        while len < rest.len() && !rest[len].is_ascii_whitespace() {
            len += 1;
        }
        if len == 0 {
            return false;
        }
        self.tz_name = Some(String::from_utf8_lossy(&rest[..len]).into_owned());
        cur.advance(len);
        true
    }

    /// Hour with the 12-hour correction applied when AM/PM was consumed:
    /// PM adds 12 to 1-11, 12 PM stays 12, 12 AM becomes 0.
    fn corrected_hour(&self) -> Option<u32> {
        let mut hour = self.hour;
        match self.am_pm {
            1 => {
                if (1..=11).contains(&hour) {
                    hour += 12;
                }
            }
            0 => {
                if hour == 12 {
                    hour = 0;
                }
            }
            _ => {}
        }
        u32::try_from(hour).ok()
    }

    /// Calendar date from the parsed fields, if they form a real date.
    #[must_use]
    pub fn make_date(&self) -> Option<NaiveDate> {
        if self.year <= 0 {
            return None;
        }
        let mon = u32::try_from(self.mon + 1).ok()?;
        let day = u32::try_from(self.day + 1).ok()?;
        NaiveDate::from_ymd_opt(self.year, mon, day)
    }

    /// Time of day from the parsed fields, date zeroed, forced UTC.
    #[must_use]
    pub fn make_time(&self) -> Option<NaiveTime> {
        let hour = self.corrected_hour()?;
        let min = u32::try_from(self.min).ok()?;
        let sec = u32::try_from(self.sec).ok()?;
        let nanos = ((self.psec * 1e9).round() as u32).min(999_999_999);
        NaiveTime::from_hms_nano_opt(hour, min, sec, nanos)
    }

    /// Full timestamp. A numeric offset (from `%z` or an ISO suffix) forces
    /// UTC and shifts the instant by the negated offset.
    #[must_use]
    pub fn make_datetime(&self) -> Option<DateTime<Utc>> {
        let date = self.make_date()?;
        let time = self.make_time()?;
        let naive = NaiveDateTime::new(date, time);
        let offset = i64::from(self.tz_offset_hours) * 3600
            + i64::from(self.tz_offset_minutes) * 60;
        Some(Utc.from_utc_datetime(&naive) - Duration::seconds(offset))
    }

    /// The zone this parse resolved to: a `%Z` name, UTC when a numeric
    /// offset was seen, otherwise the locale default.
    #[must_use]
    pub fn tz(&self) -> &str {
        if let Some(name) = &self.tz_name {
            name
        } else if self.tz_utc {
            "UTC"
        } else {
            &self.locale.tz
        }
    }

    /// Whether the last parse consumed a time-of-day component.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.has_time
    }
}

/// Longest case-insensitive prefix match against a locale name table.
fn consume_name(cur: &mut Cursor<'_>, names: &[String]) -> Option<usize> {
    let rest = cur.rest();
    let mut best: Option<(usize, usize)> = None; // (byte length, index)
    for (idx, name) in names.iter().enumerate() {
        let nb = name.as_bytes();
        if nb.is_empty() || rest.len() < nb.len() {
            continue;
        }
        if rest[..nb.len()].eq_ignore_ascii_case(nb)
            && best.is_none_or(|(len, _)| nb.len() > len)
        {
            best = Some((nb.len(), idx));
        }
    }
    let (len, idx) = best?;
    cur.advance(len);
    Some(idx)
}

/// Check a format string for malformed directives without parsing input.
///
/// Collectors run this once at construction so that per-field parsing can
/// never hit a fatal format error.
pub fn validate_format(format: &str) -> Result<(), ReadError> {
    let fmt = format.as_bytes();
    let mut i = 0;
    while i < fmt.len() {
        if fmt[i] != b'%' {
            i += 1;
            continue;
        }
        i += 1;
        if i >= fmt.len() {
            return Err(ReadError::TrailingPercent);
        }
        match fmt[i] {
            b'O' => {
                i += 1;
                if i >= fmt.len() || fmt[i] != b'S' {
                    return Err(ReadError::BadFractionalDirective);
                }
            }
            b'Y' | b'y' | b'm' | b'd' | b'e' | b'H' | b'M' | b'S' | b'p' | b'z' | b'Z'
            | b'b' | b'B' | b'.' | b'*' | b'D' | b'F' | b'R' | b'T' | b'X' | b'x' => {}
            other => return Err(ReadError::UnsupportedDirective(other as char)),
        }
        i += 1;
    }
    Ok(())
}
