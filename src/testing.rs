//! Assertion helpers for comparing parsed columns in tests.

use crate::collectors::Column;
use crate::warnings::Warnings;

/// Assert that two columns are equal in type, length and content.
///
/// # Panics
///
/// Panics with a detailed message when the columns differ.
pub fn assert_column_eq(actual: &Column, expected: &Column) {
    assert_eq!(
        actual.column_type(),
        expected.column_type(),
        "Column type mismatch:\n  Expected: {}\n  Actual: {}",
        expected.column_type(),
        actual.column_type()
    );
    assert_eq!(
        actual.len(),
        expected.len(),
        "Column length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );
    assert_eq!(
        actual, expected,
        "Column content mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that no warnings were recorded.
///
/// # Panics
///
/// Panics listing every warning when the buffer is not empty.
pub fn assert_no_warnings(warnings: &Warnings) {
    assert!(
        warnings.is_empty(),
        "Expected no warnings, got {}:\n{}",
        warnings.len(),
        warnings
    );
}

/// Assert an exact warning count.
///
/// # Panics
///
/// Panics listing every warning when the count differs.
pub fn assert_warning_count(warnings: &Warnings, expected: usize) {
    assert_eq!(
        warnings.len(),
        expected,
        "Warning count mismatch:\n  Expected: {expected}\n  Actual: {}\n{}",
        warnings.len(),
        warnings
    );
}
