//! The driver loop: wires a tokenizer to a collector set and assembles the
//! finished columns.
//!
//! Three entry points cover the public surface: [`read_file`] (identity
//! pass), [`read_lines`] (line-tokenizer path) and [`read_tokens`] (the
//! main path). [`guess_types`] runs the type guesser over the first N rows.

use crate::collectors::{collector_for, CharacterCollector, Collect, Column, ColumnSpec, ColumnType};
use crate::dialect::Dialect;
use crate::error::ReadError;
use crate::guess::guess_column_type;
use crate::locale::LocaleInfo;
use crate::progress::Progress;
use crate::source::Source;
use crate::token::Token;
use crate::tokenizer::{DelimitedTokenizer, LineTokenizer, Tokenize};
use crate::warnings::Warnings;

/// Poll progress and the interrupt flag every this many cells.
const PROGRESS_CELLS: usize = 250_000;

/// Initial collector length when the caller did not bound the row count.
const INITIAL_ROWS: usize = 1000;

/// Minimum rows added per growth step; early byte fractions are too noisy
/// to trust for small estimates.
const MIN_GROWTH_STEP: usize = 1024;

/// A finished read: named, typed columns plus accumulated warnings.
#[derive(Debug)]
pub struct Frame {
    /// Output column names, skipped columns excluded.
    pub names: Vec<String>,
    /// Output columns, in declaration order.
    pub columns: Vec<Column>,
    /// Number of rows in every column.
    pub rows: usize,
    /// Everything recoverable that went wrong along the way.
    pub warnings: Warnings,
}

/// Identity pass: the source bytes after BOM and skip-prelude handling.
#[must_use]
pub fn read_file(source: &Source) -> Vec<u8> {
    source.bytes().to_vec()
}

/// Split the source into physical lines, up to `n_max` (unbounded when
/// negative).
#[must_use]
pub fn read_lines(source: &Source, n_max: i64) -> Vec<String> {
    let mut warnings = Warnings::new();
    let mut tokenizer = LineTokenizer::new(source.bytes());
    let cap = if n_max >= 0 { n_max as usize } else { usize::MAX };

    let mut out = Vec::new();
    while out.len() < cap {
        match tokenizer.next_token(&mut warnings) {
            Token::Eof => break,
            token => {
                let content = token.content().unwrap_or(b"");
                out.push(String::from_utf8_lossy(content).into_owned());
            }
        }
    }
    out
}

/// The main path: tokenize the source under `dialect` and collect each
/// column per `col_specs`.
///
/// `col_names` may name every declared column (names of skipped columns are
/// dropped) or exactly the output columns; any other count is fatal.
/// `n_max < 0` means unbounded. Progress is reported to `progress` every
/// 250 000 cells, and its interrupt flag is polled at the same cadence;
/// an interrupt finalizes collectors at the last completed row and returns
/// the partial result.
pub fn read_tokens(
    source: &Source,
    dialect: &Dialect,
    col_specs: &[ColumnSpec],
    col_names: &[String],
    locale: &LocaleInfo,
    n_max: i64,
    progress: &mut dyn Progress,
) -> Result<Frame, ReadError> {
    let mut warnings = Warnings::new();
    let mut tokenizer = DelimitedTokenizer::new(source.bytes(), dialect);

    let mut collectors = col_specs
        .iter()
        .map(|spec| collector_for(spec, dialect, locale))
        .collect::<Result<Vec<_>, _>>()?;

    let declared = collectors.len();
    let output = collectors.iter().filter(|c| !c.skip()).count();

    let mut names: Vec<String> = col_names.to_vec();
    if declared != output && names.len() == declared {
        names = names
            .into_iter()
            .zip(collectors.iter())
            .filter(|(_, collector)| !collector.skip())
            .map(|(name, _)| name)
            .collect();
    }
    if names.len() != output {
        return Err(ReadError::ColumnNameMismatch { names: names.len(), columns: output });
    }

    let mut n = if n_max >= 0 { n_max as usize } else { INITIAL_ROWS };
    for collector in &mut collectors {
        collector.resize(n);
    }

    let mut last_row = 0usize;
    let mut seen_rows = false;
    let mut cells = 0usize;

    loop {
        let (consumed, total) = tokenizer.progress();
        if cells % PROGRESS_CELLS == 0 {
            progress.tick(consumed, total);
            if progress.interrupted() {
                tracing::debug!(row = last_row, "interrupt requested, returning partial result");
                break;
            }
        }
        cells += 1;

        let token = tokenizer.next_token(&mut warnings);
        let Some((row, col)) = token.position() else {
            break;
        };

        if col >= declared {
            warnings.add(row, col, format!("only {declared} columns"), "");
            continue;
        }

        if row >= n {
            if n_max >= 0 {
                break;
            }
            // Estimate total rows from the byte fraction consumed so far.
            let fraction = consumed as f64 / total.max(1) as f64;
            let estimated = if fraction > 0.0 {
                ((row as f64 / fraction) * 1.2) as usize
            } else {
                0
            };
            n = estimated.max(n + MIN_GROWTH_STEP);
            tracing::trace!(rows = n, "growing collectors");
            for collector in &mut collectors {
                collector.resize(n);
            }
        }

        collectors[col].set_value(row, &token, &mut warnings);
        last_row = row;
        seen_rows = true;
    }

    let (consumed, total) = tokenizer.progress();
    progress.tick(consumed, total);

    let rows = if seen_rows { last_row + 1 } else { 0 };
    for collector in &mut collectors {
        collector.resize(rows);
    }

    tracing::debug!(rows, columns = output, warnings = warnings.len(), "finished read");

    let columns = collectors
        .into_iter()
        .filter(|collector| !collector.skip())
        .map(|collector| collector.finalize())
        .collect();

    Ok(Frame { names, columns, rows, warnings })
}

/// Run the type guesser over the first `n` rows.
///
/// Columns are discovered as tokens arrive, so ragged rows still guess;
/// tokenizer warnings are deliberately swallowed here.
#[must_use]
pub fn guess_types(
    source: &Source,
    dialect: &Dialect,
    locale: &LocaleInfo,
    n: usize,
) -> Vec<ColumnType> {
    let mut warnings = Warnings::new();
    let mut tokenizer = DelimitedTokenizer::new(source.bytes(), dialect);
    let mut collectors: Vec<CharacterCollector> = Vec::new();

    loop {
        let token = tokenizer.next_token(&mut warnings);
        let Some((row, col)) = token.position() else {
            break;
        };
        if row >= n {
            break;
        }
        if col >= collectors.len() {
            for _ in collectors.len()..=col {
                let mut collector = CharacterCollector::new();
                collector.resize(n);
                collectors.push(collector);
            }
        }
        collectors[col].set_value(row, &token, &mut warnings);
    }

    collectors
        .into_iter()
        .map(|collector| guess_column_type(&collector.into_values(), dialect, locale))
        .collect()
}
