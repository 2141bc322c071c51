//! Source edits
//!
//! The markdown source is never mutated in place. Every operation of the style
//! engine describes its result as an [`Edit`]: a half-open byte range of the
//! current source plus the text that replaces it.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single range replacement over a markdown source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Whether the range can be applied to `source` without panicking.
    pub fn fits(&self, source: &str) -> bool {
        self.range.start <= self.range.end
            && self.range.end <= source.len()
            && source.is_char_boundary(self.range.start)
            && source.is_char_boundary(self.range.end)
    }

    /// `source[..start] + replacement + source[end..]`.
    ///
    /// Returns `None` when the range does not fit `source`.
    pub fn apply(&self, source: &str) -> Option<String> {
        if !self.fits(source) {
            return None;
        }
        Some(replace_markdown_at(source, self.range.clone(), &self.replacement))
    }
}

/// Replaces `range` of `source` with `value`.
///
/// # Panics
///
/// Panics when `range` is out of bounds or splits a character, like slicing does.
pub fn replace_markdown_at(source: &str, range: Range<usize>, value: &str) -> String {
    let mut output =
        String::with_capacity(source.len() - (range.end - range.start) + value.len());
    output.push_str(&source[..range.start]);
    output.push_str(value);
    output.push_str(&source[range.end..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_range() {
        let edit = Edit::new(4..8, "<b>text</b>");
        assert_eq!(edit.apply("the text here"), Some("the <b>text</b> here".to_string()));
    }

    #[test]
    fn test_apply_rejects_bad_ranges() {
        assert_eq!(Edit::new(3..20, "").apply("short"), None);
        assert_eq!(Edit::new(1..2, "").apply("é"), None);
    }

    #[test]
    fn test_empty_range_inserts() {
        assert_eq!(replace_markdown_at("ac", 1..1, "b"), "abc");
    }
}
