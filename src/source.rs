//! Read-only byte sources.
//!
//! A [`Source`] owns the bytes of one input (an in-memory buffer or a
//! memory-mapped file) and exposes the `[begin, end)` range the tokenizers
//! bind to. A leading UTF-8 byte order mark and any configured skip prelude
//! (leading lines, comment-only lines, blank lines) are consumed at
//! construction, so the tokenizer always starts at real data.

use crate::dialect::Dialect;
use anyhow::{Context, Result};
use std::fs::File;
#[cfg(not(feature = "mmap"))]
use std::io::Read;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Prelude-skipping options applied when a source is materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// Number of leading lines to consume before the data starts.
    pub skip: usize,
    /// Also consume blank lines at the start of the data.
    pub skip_empty_rows: bool,
    /// Comment prefix; comment-only lines at the start are consumed.
    pub comment: String,
    /// Honor quoting while counting skipped lines, so a quoted newline does
    /// not end a line.
    pub skip_quotes: bool,
}

impl SourceOptions {
    /// Derive the skip prelude from a tokenizer dialect.
    #[must_use]
    pub fn from_dialect(dialect: &Dialect) -> Self {
        Self {
            skip: dialect.skip,
            skip_empty_rows: dialect.skip_empty_rows,
            comment: dialect.comment.clone(),
            skip_quotes: true,
        }
    }
}

enum SourceData {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
}

impl SourceData {
    fn bytes(&self) -> &[u8] {
        match self {
            SourceData::Owned(buf) => buf,
            #[cfg(feature = "mmap")]
            SourceData::Mapped(map) => map,
        }
    }
}

/// An immutable byte range ready for tokenization.
///
/// The source must outlive every tokenizer bound to it and every zero-copy
/// token slice cut from it; collectors copy field content out before the
/// source is released.
pub struct Source {
    data: SourceData,
    start: usize,
}

impl Source {
    /// Map `path` into memory (or read it, without the `mmap` feature) and
    /// apply the skip prelude.
    pub fn open(path: impl AsRef<Path>, options: &SourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;

        #[cfg(feature = "mmap")]
        let data = {
            let len = file
                .metadata()
                .with_context(|| format!("stat {}", path.display()))?
                .len();
            if len == 0 {
                // zero-length mappings are rejected on most platforms
                SourceData::Owned(Vec::new())
            } else {
                // Safety: the mapping is read-only and private to this source.
                let map = unsafe { Mmap::map(&file) }
                    .with_context(|| format!("mmap {}", path.display()))?;
                SourceData::Mapped(map)
            }
        };

        #[cfg(not(feature = "mmap"))]
        let data = {
            let mut file = file;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            SourceData::Owned(buf)
        };

        tracing::debug!(path = %path.display(), bytes = data.bytes().len(), "opened source");
        Ok(Self::from_data(data, options))
    }

    /// Wrap an in-memory buffer and apply the skip prelude.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, options: &SourceOptions) -> Self {
        Self::from_data(SourceData::Owned(bytes), options)
    }

    /// Wrap a string and apply the skip prelude.
    #[must_use]
    pub fn from_string(text: impl Into<String>, options: &SourceOptions) -> Self {
        Self::from_bytes(text.into().into_bytes(), options)
    }

    fn from_data(data: SourceData, options: &SourceOptions) -> Self {
        let buf = data.bytes();
        let mut start = skip_bom(buf);
        start = skip_lines(
            buf,
            start,
            options.skip,
            options.skip_empty_rows,
            options.comment.as_bytes(),
            options.skip_quotes,
        );
        Self { data, start }
    }

    /// The `[begin, end)` byte range after BOM and prelude skipping.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data.bytes()[self.start..]
    }

    /// Total size of the underlying input, including skipped bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.data.bytes().len()
    }
}

/// Offset past a leading UTF-8 byte order mark, if present.
fn skip_bom(buf: &[u8]) -> usize {
    if buf.starts_with(UTF8_BOM) {
        UTF8_BOM.len()
    } else {
        0
    }
}

/// Consume `skip` lines starting at `pos`, then any comment-only lines and
/// (optionally) blank lines. Returns the offset of the first data byte.
fn skip_lines(
    buf: &[u8],
    mut pos: usize,
    skip: usize,
    skip_empty_rows: bool,
    comment: &[u8],
    skip_quotes: bool,
) -> usize {
    let mut skipped = 0;
    while skipped < skip && pos < buf.len() {
        pos = skip_one_line(buf, pos, skip_quotes);
        skipped += 1;
    }

    loop {
        if !comment.is_empty() && buf[pos..].starts_with(comment) {
            pos = skip_one_line(buf, pos, false);
            continue;
        }
        if skip_empty_rows && pos < buf.len() && (buf[pos] == b'\n' || buf[pos] == b'\r') {
            pos = skip_one_line(buf, pos, false);
            continue;
        }
        break;
    }
    pos
}

/// Advance past one line, treating `\r\n`, `\r` and `\n` as terminators.
/// With `honor_quotes`, newlines inside double quotes do not end the line.
fn skip_one_line(buf: &[u8], mut pos: usize, honor_quotes: bool) -> usize {
    let mut in_quote = false;
    while pos < buf.len() {
        let b = buf[pos];
        if honor_quotes && b == b'"' {
            in_quote = !in_quote;
            pos += 1;
            continue;
        }
        if !in_quote && (b == b'\n' || b == b'\r') {
            if b == b'\r' && buf.get(pos + 1) == Some(&b'\n') {
                return pos + 2;
            }
            return pos + 1;
        }
        pos += 1;
    }
    pos
}
