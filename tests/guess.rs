use colstream::guess::guess_column_type;
use colstream::{ColumnType, Dialect, LocaleInfo};

fn column(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

fn guess(values: &[&str]) -> ColumnType {
    guess_column_type(&column(values), &Dialect::csv(), &LocaleInfo::english())
}

#[test]
fn narrowest_numeric_fit() {
    assert_eq!(guess(&["1", "2", "3"]), ColumnType::Integer);
    assert_eq!(guess(&["1", "2", "3.5", ""]), ColumnType::Double);
    assert_eq!(guess(&["1e3", "-2.5"]), ColumnType::Double);
}

#[test]
fn logical_words_but_not_digits() {
    assert_eq!(guess(&["TRUE", "F", "false"]), ColumnType::Logical);
    // bare 1/0 must guess as integer, not logical
    assert_eq!(guess(&["1", "0"]), ColumnType::Integer);
}

#[test]
fn temporal_guesses() {
    assert_eq!(guess(&["2024-01-01", "2024-02-29"]), ColumnType::Date);
    assert_eq!(
        guess(&["2024-01-01T03:04:05", "2024-01-02 06:07:08"]),
        ColumnType::Datetime
    );
    assert_eq!(guess(&["13:04:05", "06:07"]), ColumnType::Time);
}

#[test]
fn invalid_calendar_dates_fall_through() {
    assert_eq!(guess(&["2023-02-29"]), ColumnType::Character);
}

#[test]
fn mixed_falls_back_to_character() {
    assert_eq!(guess(&["1", "x"]), ColumnType::Character);
    assert_eq!(guess(&["2024-01-01", "not a date"]), ColumnType::Character);
}

#[test]
fn missing_entries_are_skipped() {
    let values = vec![
        None,
        Some(String::new()),
        Some("NA".to_string()),
        Some("7".to_string()),
    ];
    assert_eq!(
        guess_column_type(&values, &Dialect::csv(), &LocaleInfo::english()),
        ColumnType::Integer
    );
}

#[test]
fn all_missing_guesses_narrowest() {
    assert_eq!(guess(&[]), ColumnType::Logical);
    assert_eq!(guess(&["", "NA"]), ColumnType::Logical);
}

#[test]
fn locale_decimal_mark_applies() {
    let mut locale = LocaleInfo::english();
    locale.decimal_mark = b',';
    assert_eq!(
        guess_column_type(&column(&["1,5", "2,25"]), &Dialect::csv(), &locale),
        ColumnType::Double
    );
}
