//! Line/column to byte-offset mapping
//!
//! comrak reports source positions as 1-based line and column pairs with an
//! inclusive end column. The content tree stores byte offsets with an exclusive
//! end, so every span goes through a [`LineIndex`] built once per parse.

use crate::tree::{Point, Position};
use comrak::nodes::Sourcepos;

/// Start offsets of every line of a source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(index, _)| index + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|index| self.line_starts.get(index))
            .copied()
    }

    /// Text of 1-based `line` without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<&'s str> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Byte offset of a 1-based line and column, clamped to the end of that line.
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let line_len = self.line_text(line).map(str::len).unwrap_or(0);
        Some(start + column.saturating_sub(1).min(line_len))
    }

    /// Line/column point of a byte offset.
    pub fn point(&self, offset: usize) -> Point {
        let offset = offset.min(self.source.len());
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        Point::new(
            line_index + 1,
            offset - self.line_starts[line_index] + 1,
            offset,
        )
    }

    /// Position covering the half-open byte range `start..end`.
    ///
    /// Trailing whitespace is left out of the span. Returns `None` for ranges
    /// that are reversed, out of bounds or not on character boundaries.
    pub fn position(&self, start: usize, end: usize) -> Option<Position> {
        if start > end || end > self.source.len() {
            return None;
        }
        if !self.source.is_char_boundary(start) || !self.source.is_char_boundary(end) {
            return None;
        }
        let trimmed = self.source[start..end].trim_end();
        let end = start + trimmed.len();
        Some(Position::new(self.point(start), self.point(end)))
    }

    /// Converts a comrak source position into a byte-offset [`Position`].
    pub fn sourcepos_position(&self, sourcepos: &Sourcepos) -> Option<Position> {
        if sourcepos.start.line == 0 || sourcepos.start.column == 0 {
            return None;
        }
        let start = self.offset(sourcepos.start.line, sourcepos.start.column)?;
        let end_line_start = self.line_start(sourcepos.end.line)?;
        let end_line_len = self
            .line_text(sourcepos.end.line)
            .map(str::len)
            .unwrap_or(0);
        let end = end_line_start + sourcepos.end.column.min(end_line_len);
        self.position(start, end)
    }
}
