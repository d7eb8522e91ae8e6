//! Fatal error taxonomy.
//!
//! Data-level problems (malformed quoting, unparseable fields, extra columns)
//! are never fatal: they accumulate in [`Warnings`](crate::Warnings) and the
//! parse continues at the next row boundary. Spec errors surface through
//! [`ReadError`]; I/O errors are raised by the source layer with path
//! context attached and pass through unchanged.

use thiserror::Error;

/// An error that aborts a read before or during the parse.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The supplied column names do not line up with the non-skipped columns.
    #[error("you have {names} column names, but {columns} columns")]
    ColumnNameMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of output (non-skipped) columns.
        columns: usize,
    },

    /// A `%` directive the date/time format interpreter does not understand.
    #[error("unsupported format directive %{0}")]
    UnsupportedDirective(char),

    /// A date/time format string ending in a bare `%`.
    #[error("invalid format: trailing %")]
    TrailingPercent,

    /// `%O` must be followed by `S`.
    #[error("invalid format: %O must be followed by %S")]
    BadFractionalDirective,
}
