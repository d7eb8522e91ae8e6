use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use colstream::datetime::{validate_format, DateTimeParser};
use colstream::{LocaleInfo, ReadError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn iso_date_only() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_iso8601(b"2024-02-03"));
    assert!(!parser.has_time());
    assert_eq!(parser.make_date(), Some(date(2024, 2, 3)));
}

#[test]
fn iso_compact_date() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_iso8601(b"20240203"));
    assert_eq!(parser.make_date(), Some(date(2024, 2, 3)));
}

#[test]
fn iso_datetime_with_t_or_space() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    for input in [&b"2024-01-02T03:04:05"[..], &b"2024-01-02 03:04:05"[..]] {
        assert!(parser.parse_iso8601(input), "failed on {input:?}");
        assert!(parser.has_time());
        assert_eq!(
            parser.make_datetime(),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
    }
}

#[test]
fn iso_partial_times() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_iso8601(b"2024-01-02T03"));
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap())
    );
    assert!(parser.parse_iso8601(b"2024-01-02T03:30"));
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 30, 0).unwrap())
    );
}

#[test]
fn iso_fractional_second_and_zulu() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_iso8601(b"2020-01-02T03:04:05.5Z"));
    assert_eq!(parser.tz(), "UTC");
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(500))
    );
}

#[test]
fn iso_numeric_offset_shifts_to_utc() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_iso8601(b"2024-01-01T12:00:00+02:00"));
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
    );

    assert!(parser.parse_iso8601(b"2024-01-01T12:00:00-0130"));
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap())
    );
}

#[test]
fn iso_rejects_trailing_junk() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(!parser.parse_iso8601(b"2024-01-02x"));
    assert!(!parser.parse_iso8601(b"2024-01"));
    assert!(!parser.parse_iso8601(b""));
}

#[test]
fn format_ymd_hms() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser
        .parse_format("%Y-%m-%d %H:%M:%S", b"2024-02-29 13:04:05")
        .unwrap());
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 2, 29, 13, 4, 5).unwrap())
    );
}

#[test]
fn format_matches_but_calendar_rejects() {
    // Feb only has 28 days in 2023: the format matches byte-wise, the date
    // does not exist.
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y-%m-%d", b"2023-02-29").unwrap());
    assert_eq!(parser.make_date(), None);
}

#[test]
fn format_abbreviated_month_name() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%d %b %Y", b"3 Feb 2024").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 2, 3)));
}

#[test]
fn format_full_month_name_case_insensitive() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%d %B %Y", b"3 february 2024").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 2, 3)));
}

#[test]
fn month_name_longest_match_wins() {
    let mut locale = LocaleInfo::english();
    // "Ma" would shadow "May" under first-match order.
    locale.months_abbrev[2] = "Ma".to_string();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%d %b %Y", b"1 May 2024").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 5, 1)));
}

#[test]
fn two_digit_year_pivot() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%y/%m/%d", b"68/01/01").unwrap());
    assert_eq!(parser.make_date(), Some(date(2068, 1, 1)));
    assert!(parser.parse_format("%y/%m/%d", b"69/01/01").unwrap());
    assert_eq!(parser.make_date(), Some(date(1969, 1, 1)));
}

#[test]
fn day_with_optional_leading_space() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y-%m-%e", b"2024-01- 3").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 1, 3)));
    assert!(parser.parse_format("%Y-%m-%e", b"2024-01-13").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 1, 13)));
}

#[test]
fn am_pm_correction() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);

    assert!(parser.parse_format("%H:%M %p", b"12:30 AM").unwrap());
    assert_eq!(parser.make_time(), NaiveTime::from_hms_opt(0, 30, 0));

    assert!(parser.parse_format("%H:%M %p", b"01:30 pm").unwrap());
    assert_eq!(parser.make_time(), NaiveTime::from_hms_opt(13, 30, 0));

    assert!(parser.parse_format("%H:%M %p", b"12:30 PM").unwrap());
    assert_eq!(parser.make_time(), NaiveTime::from_hms_opt(12, 30, 0));
}

#[test]
fn hour_without_am_pm_is_untouched() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%H:%M", b"12:00").unwrap());
    assert_eq!(parser.make_time(), NaiveTime::from_hms_opt(12, 0, 0));
}

#[test]
fn offset_directive_shifts_instant() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser
        .parse_format("%Y-%m-%d %H:%M %z", b"2024-01-01 12:00 +0200")
        .unwrap());
    assert_eq!(parser.tz(), "UTC");
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
    );
}

#[test]
fn tz_name_is_captured_not_converted() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser
        .parse_format("%Y-%m-%d %Z", b"2024-01-02 America/Chicago")
        .unwrap());
    assert_eq!(parser.tz(), "America/Chicago");
    assert_eq!(parser.make_date(), Some(date(2024, 1, 2)));
}

#[test]
fn compound_directives_expand() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%F %T", b"2024-01-02 03:04:05").unwrap());
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    );

    assert!(parser.parse_format("%D", b"01/02/24").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 1, 2)));
}

#[test]
fn compound_failure_fails_whole_parse() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(!parser.parse_format("%F", b"2024-01").unwrap());
}

#[test]
fn skip_directives() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y%.%m", b"2024/01").unwrap());
    assert_eq!(parser.make_date(), None); // day never set

    assert!(parser.parse_format("%*%Y-%m-%d", b"created: 2024-01-02").unwrap());
    assert_eq!(parser.make_date(), Some(date(2024, 1, 2)));
}

#[test]
fn format_whitespace_matches_any_run() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y %m", b"2024   01").unwrap());
    assert!(parser.parse_format("%Y - %m", b"2024-01").unwrap());
    assert!(parser.parse_format("%Y-%m-%d", b"  2024-01-02  ").unwrap());
}

#[test]
fn fractional_seconds_directive() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser
        .parse_format("%Y-%m-%d %H:%M:%OS", b"2024-01-01 00:00:05.25")
        .unwrap());
    assert_eq!(
        parser.make_datetime(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 5).unwrap() + Duration::milliseconds(250))
    );
}

#[test]
fn integer_seconds_discard_fraction() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%H:%M:%S", b"00:00:05.25").unwrap());
    assert_eq!(parser.make_time(), NaiveTime::from_hms_opt(0, 0, 5));
}

#[test]
fn locale_decimal_mark_in_seconds() {
    let mut locale = LocaleInfo::english();
    locale.decimal_mark = b',';
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%H:%M:%OS", b"00:00:05,5").unwrap());
    assert_eq!(
        parser.make_time(),
        NaiveTime::from_hms_milli_opt(0, 0, 5, 500)
    );
}

#[test]
fn default_zone_comes_from_locale() {
    let mut locale = LocaleInfo::english();
    locale.tz = "Europe/Berlin".to_string();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y-%m-%d", b"2024-01-02").unwrap());
    assert_eq!(parser.tz(), "Europe/Berlin");
}

#[test]
fn format_errors_are_fatal() {
    assert!(matches!(
        validate_format("%Y %q"),
        Err(ReadError::UnsupportedDirective('q'))
    ));
    assert!(matches!(validate_format("%Y %"), Err(ReadError::TrailingPercent)));
    assert!(matches!(
        validate_format("%O"),
        Err(ReadError::BadFractionalDirective)
    ));
    assert!(validate_format("%Y-%m-%d %H:%M:%OS %z").is_ok());

    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(parser.parse_format("%Y %q", b"2024 x").is_err());
    assert!(parser.parse_format("%", b"x").is_err());
}

#[test]
fn value_mismatch_is_not_fatal() {
    let locale = LocaleInfo::english();
    let mut parser = DateTimeParser::new(&locale);
    assert!(!parser.parse_format("%Y-%m-%d", b"not a date").unwrap());
    assert!(!parser.parse_format("%Y-%m-%d", b"2024-01-02 extra").unwrap());
}
