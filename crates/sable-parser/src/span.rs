//! Source location tracking.
//!
//! Every node carries a `Span` of byte offsets into the source text. Line and
//! column numbers are only computed on demand through [`LineIndex`].

use serde::Serialize;

/// A half-open byte range `start..end` in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        Self { start: pos, end: pos }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub const fn merge(self, other: Span) -> Span {
        Span {
            start: if self.start < other.start { self.start } else { other.start },
            end: if self.end > other.end { self.end } else { other.end },
        }
    }

    /// Whether `other` lies entirely inside this span (bounds inclusive).
    #[inline]
    pub const fn encloses(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The span as a `usize` range, for slicing and diagnostic labels.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Maps byte offsets to line/column pairs.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offsets of the start of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            match c {
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push((i + c.len_utf8()) as u32),
                '\r' if !source[i + 1..].starts_with('\n') => line_starts.push((i + 1) as u32),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Line and column of `offset`, both 0-indexed. Columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        (line as u32, offset - self.line_starts[line])
    }

    /// Byte offset of a 0-indexed line/column pair.
    pub fn offset(&self, line: u32, col: u32) -> u32 {
        self.line_starts.get(line as usize).copied().unwrap_or(0) + col
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
