//! The character collector: copies field bytes into owned strings.

use crate::collectors::{Collect, Column};
use crate::token::Token;
use crate::warnings::Warnings;

/// Accumulates text fields. Missing fields become `None`; empty fields
/// become the empty string (the two are distinct).
#[derive(Debug, Default)]
pub struct CharacterCollector {
    out: Vec<Option<String>>,
}

impl CharacterCollector {
    /// Create an empty character collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the collector and return its raw values (used by the type
    /// guesser, which works on character columns).
    #[must_use]
    pub fn into_values(self) -> Vec<Option<String>> {
        self.out
    }
}

impl Collect for CharacterCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, _warnings: &mut Warnings) {
        match token {
            Token::Field { content, .. } => {
                self.out[i] = Some(String::from_utf8_lossy(content).into_owned());
            }
            Token::Missing { .. } => self.out[i] = None,
            Token::Empty { .. } => self.out[i] = Some(String::new()),
            Token::Eof => {}
        }
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Character(self.out)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}
