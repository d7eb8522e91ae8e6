//! The factor collector: fields become indices into a levels list.

use crate::collectors::{Collect, Column};
use crate::token::Token;
use crate::warnings::Warnings;
use std::collections::HashMap;

/// Accumulates level indices against a fixed (or growing) levels list.
#[derive(Debug)]
pub struct FactorCollector {
    out: Vec<Option<u32>>,
    levels: Vec<String>,
    index: HashMap<String, u32>,
    include_unknown: bool,
}

impl FactorCollector {
    /// Create a factor collector over `levels`. With `include_unknown`,
    /// values outside the list are appended as new levels; otherwise they
    /// become missing with a warning.
    #[must_use]
    pub fn new(levels: Vec<String>, include_unknown: bool) -> Self {
        let index = levels
            .iter()
            .enumerate()
            .map(|(i, level)| (level.clone(), i as u32))
            .collect();
        Self { out: Vec::new(), levels, index, include_unknown }
    }

    fn lookup(&mut self, text: &str) -> Option<u32> {
        if let Some(&i) = self.index.get(text) {
            return Some(i);
        }
        if self.include_unknown {
            let i = self.levels.len() as u32;
            self.levels.push(text.to_string());
            self.index.insert(text.to_string(), i);
            return Some(i);
        }
        None
    }
}

impl Collect for FactorCollector {
    fn resize(&mut self, n: usize) {
        self.out.resize(n, None);
    }

    fn set_value(&mut self, i: usize, token: &Token<'_>, warnings: &mut Warnings) {
        self.out[i] = match token {
            Token::Field { content, row, col, .. } => {
                let text = String::from_utf8_lossy(content);
                let found = self.lookup(&text);
                if found.is_none() {
                    warnings.add(
                        *row,
                        *col,
                        format!("value in level set ({})", self.levels.join(", ")),
                        text,
                    );
                }
                found
            }
            // An empty field only maps to a level when "" is itself a level.
            Token::Empty { .. } => self.index.get("").copied(),
            _ => None,
        };
    }

    fn finalize(self: Box<Self>) -> Column {
        Column::Factor { indices: self.out, levels: self.levels }
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}
