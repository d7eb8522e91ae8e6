//! Structured, deferred parse diagnostics.
//!
//! Every recoverable problem found during tokenization or collection is
//! recorded here as a `(row, col, expected, actual)` record and surfaced to
//! the caller alongside the finished columns. Warnings never interrupt the
//! parse.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One recoverable parse problem, anchored to a cell position.
///
/// `row` and `col` are zero-based logical coordinates as emitted by the
/// tokenizer (after skipped lines and comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Zero-based logical row of the offending cell.
    pub row: usize,
    /// Zero-based column of the offending cell.
    pub col: usize,
    /// What the parser expected at that position.
    pub expected: String,
    /// What it actually saw (may be empty when nothing useful can be shown).
    pub actual: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]: expected {}", self.row + 1, self.col + 1, self.expected)?;
        if !self.actual.is_empty() {
            write!(f, " but got {}", self.actual)?;
        }
        Ok(())
    }
}

/// Append-only warning buffer attached to a finished read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning at `(row, col)`.
    pub fn add(
        &mut self,
        row: usize,
        col: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) {
        self.items.push(Warning {
            row,
            col,
            expected: expected.into(),
            actual: actual.into(),
        });
    }

    /// Number of warnings recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the recorded warnings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.items.iter()
    }

    /// Remove and return all recorded warnings, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.items)
    }

    /// Append every warning from `other` into this buffer.
    pub fn merge(&mut self, other: Warnings) {
        self.items.extend(other.items);
    }

    /// Write the warnings to `path` as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.items)?;
        let mut file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in &self.items {
            writeln!(f, "{w}")?;
        }
        Ok(())
    }
}
