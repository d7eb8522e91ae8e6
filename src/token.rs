//! Tokens produced by the tokenizers.

/// A single tokenization event.
///
/// `Field` content borrows either the bound source range it was cut from
/// (zero-copy, `unescaped == false`) or the tokenizer's scratch buffer when
/// quotes or escapes had to be materialized (`unescaped == true`). Either
/// way the borrow is tied to the tokenizer, so consumers must copy whatever
/// they keep before requesting the next token; the borrow checker enforces
/// this.
///
/// `row` is monotonically non-decreasing across a token stream and `col`
/// resets to zero at every row advance. Exactly one `Eof` terminates the
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A field with content.
    Field {
        /// Raw field bytes, already unquoted/unescaped.
        content: &'a [u8],
        /// True when the content lives in the scratch buffer rather than the
        /// source.
        unescaped: bool,
        /// Zero-based logical row.
        row: usize,
        /// Zero-based column within the row.
        col: usize,
    },
    /// A field matching one of the configured NA markers.
    Missing {
        /// Zero-based logical row.
        row: usize,
        /// Zero-based column within the row.
        col: usize,
    },
    /// A zero-length field (distinct from `Missing`).
    Empty {
        /// Zero-based logical row.
        row: usize,
        /// Zero-based column within the row.
        col: usize,
    },
    /// Terminal sentinel; no further tokens follow.
    Eof,
}

impl<'a> Token<'a> {
    /// The `(row, col)` position of this token, or `None` for `Eof`.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            Token::Field { row, col, .. }
            | Token::Missing { row, col }
            | Token::Empty { row, col } => Some((row, col)),
            Token::Eof => None,
        }
    }

    /// Field content bytes, or `None` for non-`Field` tokens.
    #[must_use]
    pub fn content(&self) -> Option<&'a [u8]> {
        match *self {
            Token::Field { content, .. } => Some(content),
            _ => None,
        }
    }
}
