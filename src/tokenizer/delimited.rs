//! The delimited-record tokenizer: a byte-level state machine that cuts a
//! source range into fields under a configured [`Dialect`].
//!
//! Fields that need no unescaping are emitted as zero-copy slices of the
//! source; quoted fields containing escapes are materialized into a scratch
//! buffer that is reused across tokens. The returned token borrows the
//! tokenizer either way, so consumers materialize before pulling the next
//! token.

use crate::dialect::Dialect;
use crate::token::Token;
use crate::tokenizer::Tokenize;
use crate::warnings::Warnings;

/// Machine state, carrying the source offsets of the field in flight.
/// Offsets are ignored once content has moved to the scratch buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted { begin: usize },
    Quoted { begin: usize },
    QuotedEscape { begin: usize },
    QuotedEnd { begin: usize, end: usize },
}

/// State machine turning bytes into [`Token`]s for one input.
pub struct DelimitedTokenizer<'s> {
    src: &'s [u8],
    dialect: Dialect,
    pos: usize,
    row: usize,
    col: usize,
    scratch: Vec<u8>,
    done: bool,
}

impl<'s> DelimitedTokenizer<'s> {
    /// Bind a tokenizer to `src` under `dialect`. The range is expected to
    /// start at real data; BOM and skip preludes are the source's job.
    #[must_use]
    pub fn new(src: &'s [u8], dialect: &Dialect) -> Self {
        Self {
            src,
            dialect: dialect.clone(),
            pos: 0,
            row: 0,
            col: 0,
            scratch: Vec::new(),
            done: false,
        }
    }

    fn comment_here(&self) -> bool {
        !self.dialect.comment.is_empty()
            && self.src[self.pos..].starts_with(self.dialect.comment.as_bytes())
    }

    /// Consume up to and including the next line terminator.
    fn consume_comment_line(&mut self) {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            if b == b'\n' || b == b'\r' {
                self.consume_newline();
                return;
            }
            self.pos += 1;
        }
    }

    /// Consume `\r\n`, `\r` or `\n` at the cursor.
    fn consume_newline(&mut self) {
        if self.src[self.pos] == b'\r' {
            self.pos += 1;
            if self.src.get(self.pos) == Some(&b'\n') {
                self.pos += 1;
            }
        } else {
            self.pos += 1;
        }
    }

    fn advance_row(&mut self) {
        self.row += 1;
        self.col = 0;
    }

    /// Classify an unquoted slice: trim, match NA markers, detect emptiness.
    fn unquoted_token(&self, mut content: &'s [u8], row: usize, col: usize) -> Token<'s> {
        if self.dialect.trim_ws {
            while let Some((last, rest)) = content.split_last() {
                if *last == b' ' || *last == b'\t' {
                    content = rest;
                } else {
                    break;
                }
            }
        }
        if content.is_empty() {
            Token::Empty { row, col }
        } else if self.dialect.is_na(content) {
            Token::Missing { row, col }
        } else {
            Token::Field { content, unescaped: false, row, col }
        }
    }
}

impl Tokenize for DelimitedTokenizer<'_> {
    fn next_token(&mut self, warnings: &mut Warnings) -> Token<'_> {
        if self.done {
            return Token::Eof;
        }

        let src = self.src;
        let delim = self.dialect.delim;
        let quote = self.dialect.quote;
        let escape_backslash = self.dialect.escape_backslash;
        let escape_double = self.dialect.escape_double;
        let trim_ws = self.dialect.trim_ws;
        let skip_empty_rows = self.dialect.skip_empty_rows;

        let mut state = State::FieldStart;
        let mut scratch_active = false;
        let mut junk_warned = false;
        self.scratch.clear();

        loop {
            if self.pos >= src.len() {
                self.done = true;
                match state {
                    State::FieldStart => {
                        if self.col > 0 {
                            return Token::Empty { row: self.row, col: self.col };
                        }
                        return Token::Eof;
                    }
                    State::Unquoted { begin } => {
                        return self.unquoted_token(&src[begin..], self.row, self.col);
                    }
                    State::Quoted { begin } | State::QuotedEscape { begin } => {
                        warnings.add(self.row, self.col, "closing quote at end of file", "");
                        let (row, col) = (self.row, self.col);
                        let content: &[u8] =
                            if scratch_active { &self.scratch } else { &src[begin..] };
                        return quoted_token(&self.dialect, content, scratch_active, row, col);
                    }
                    State::QuotedEnd { begin, end } => {
                        let (row, col) = (self.row, self.col);
                        let content: &[u8] =
                            if scratch_active { &self.scratch } else { &src[begin..end] };
                        return quoted_token(&self.dialect, content, scratch_active, row, col);
                    }
                }
            }

            let b = src[self.pos];
            match state {
                State::FieldStart => {
                    if self.col == 0 && self.comment_here() {
                        self.consume_comment_line();
                    } else if b == delim {
                        let tok = Token::Empty { row: self.row, col: self.col };
                        self.pos += 1;
                        self.col += 1;
                        return tok;
                    } else if b == b'\n' || b == b'\r' {
                        let (row, col) = (self.row, self.col);
                        self.consume_newline();
                        if col > 0 || !skip_empty_rows {
                            self.advance_row();
                            return Token::Empty { row, col };
                        }
                        // blank row skipped: neither row nor col advance
                    } else if b == quote {
                        self.pos += 1;
                        state = State::Quoted { begin: self.pos };
                    } else if trim_ws && (b == b' ' || b == b'\t') {
                        self.pos += 1;
                    } else {
                        state = State::Unquoted { begin: self.pos };
                        self.pos += 1;
                    }
                }

                State::Unquoted { begin } => {
                    if b == delim {
                        let (row, col) = (self.row, self.col);
                        let end = self.pos;
                        self.pos += 1;
                        self.col += 1;
                        return self.unquoted_token(&src[begin..end], row, col);
                    } else if b == b'\n' || b == b'\r' {
                        let (row, col) = (self.row, self.col);
                        let end = self.pos;
                        self.consume_newline();
                        self.advance_row();
                        return self.unquoted_token(&src[begin..end], row, col);
                    } else {
                        self.pos += 1;
                    }
                }

                State::Quoted { begin } => {
                    if escape_backslash && b == b'\\' {
                        if !scratch_active {
                            self.scratch.extend_from_slice(&src[begin..self.pos]);
                            scratch_active = true;
                        }
                        self.pos += 1;
                        state = State::QuotedEscape { begin };
                    } else if b == quote {
                        if escape_double && src.get(self.pos + 1) == Some(&quote) {
                            if !scratch_active {
                                self.scratch.extend_from_slice(&src[begin..self.pos]);
                                scratch_active = true;
                            }
                            self.scratch.push(quote);
                            self.pos += 2;
                        } else {
                            state = State::QuotedEnd { begin, end: self.pos };
                            self.pos += 1;
                        }
                    } else {
                        // covers embedded newlines, which do not advance the
                        // logical row
                        if scratch_active {
                            self.scratch.push(b);
                        }
                        self.pos += 1;
                    }
                }

                State::QuotedEscape { begin } => {
                    let unescaped = match b {
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        other => other,
                    };
                    self.scratch.push(unescaped);
                    self.pos += 1;
                    state = State::Quoted { begin };
                }

                State::QuotedEnd { begin, end } => {
                    if b == delim {
                        let (row, col) = (self.row, self.col);
                        self.pos += 1;
                        self.col += 1;
                        let content: &[u8] =
                            if scratch_active { &self.scratch } else { &src[begin..end] };
                        return quoted_token(&self.dialect, content, scratch_active, row, col);
                    } else if b == b'\n' || b == b'\r' {
                        let (row, col) = (self.row, self.col);
                        self.consume_newline();
                        self.advance_row();
                        let content: &[u8] =
                            if scratch_active { &self.scratch } else { &src[begin..end] };
                        return quoted_token(&self.dialect, content, scratch_active, row, col);
                    } else if trim_ws && (b == b' ' || b == b'\t') {
                        self.pos += 1;
                    } else {
                        if !junk_warned {
                            warnings.add(
                                self.row,
                                self.col,
                                "delimiter or quote",
                                String::from_utf8_lossy(&[b]),
                            );
                            junk_warned = true;
                        }
                        self.pos += 1;
                    }
                }
            }
        }
    }

    fn progress(&self) -> (usize, usize) {
        (self.pos, self.src.len())
    }
}

/// Classify finished quoted content: NA markers (when `quoted_na`) and
/// zero-length fields are not plain fields.
fn quoted_token<'a>(
    dialect: &Dialect,
    content: &'a [u8],
    unescaped: bool,
    row: usize,
    col: usize,
) -> Token<'a> {
    if content.is_empty() {
        Token::Empty { row, col }
    } else if dialect.quoted_na && dialect.is_na(content) {
        Token::Missing { row, col }
    } else {
        Token::Field { content, unescaped, row, col }
    }
}
