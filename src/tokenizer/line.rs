//! Degenerate tokenizer yielding one token per physical line.
//!
//! No quoting, no delimiters, no NA handling; trailing `\r`/`\n` is
//! stripped. Used by the raw line reader.

use crate::token::Token;
use crate::tokenizer::Tokenize;
use crate::warnings::Warnings;

/// One [`Token::Field`] per line, column always zero.
pub struct LineTokenizer<'s> {
    src: &'s [u8],
    pos: usize,
    row: usize,
    done: bool,
}

impl<'s> LineTokenizer<'s> {
    /// Bind a line tokenizer to `src`.
    #[must_use]
    pub fn new(src: &'s [u8]) -> Self {
        Self { src, pos: 0, row: 0, done: false }
    }
}

impl Tokenize for LineTokenizer<'_> {
    fn next_token(&mut self, _warnings: &mut Warnings) -> Token<'_> {
        if self.done || self.pos >= self.src.len() {
            self.done = true;
            return Token::Eof;
        }

        let begin = self.pos;
        let mut end = self.pos;
        while end < self.src.len() && self.src[end] != b'\n' && self.src[end] != b'\r' {
            end += 1;
        }

        self.pos = end;
        if self.pos < self.src.len() {
            if self.src[self.pos] == b'\r' {
                self.pos += 1;
                if self.src.get(self.pos) == Some(&b'\n') {
                    self.pos += 1;
                }
            } else {
                self.pos += 1;
            }
        }

        let row = self.row;
        self.row += 1;
        Token::Field { content: &self.src[begin..end], unescaped: false, row, col: 0 }
    }

    fn progress(&self) -> (usize, usize) {
        (self.pos, self.src.len())
    }
}
