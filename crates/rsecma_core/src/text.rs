//! Text positions and span types for source location tracking.
//!
//! Two kinds of span exist: [`TextSpan`] measures bytes of source text, while
//! [`TokenSpan`] measures indices into a token buffer. AST nodes record token
//! spans; diagnostics and rendering convert those to byte spans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A fully resolved source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: TextPos,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl Position {
    /// The position of the first character of an input.
    pub const START: Position = Position { offset: 0, line: 1, column: 1 };

    #[inline]
    pub fn new(offset: TextPos, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }

    /// Advance this position over `text`, which must immediately follow it.
    ///
    /// `\r\n` counts as a single line advance; `\r`, `\n`, U+2028 and U+2029
    /// each end a line on their own.
    pub fn advance(&mut self, text: &str) {
        self.offset += text.len() as TextPos;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.line += 1;
                    self.column = 1;
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span in source text, defined by a start position and a length in bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A half-open range of token indices, `start..end`.
///
/// Every AST node carries one. Spans of a node's children are ordered,
/// non-overlapping, and contained in the node's own span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: u32,
    pub end: u32,
}

impl TokenSpan {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// Number of tokens covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this span.
    #[inline]
    pub fn contains_span(&self, other: TokenSpan) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether this span ends at or before `other` begins.
    #[inline]
    pub fn precedes(&self, other: TokenSpan) -> bool {
        self.end <= other.start
    }

    /// Convert to an index range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}..#{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
    }

    #[test]
    fn test_text_span_from_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
    }

    #[test]
    fn test_token_span_relations() {
        let outer = TokenSpan::new(2, 10);
        let inner = TokenSpan::new(3, 5);
        let after = TokenSpan::new(5, 9);
        assert!(outer.contains_span(inner));
        assert!(outer.contains_span(after));
        assert!(inner.precedes(after));
        assert!(!after.precedes(inner));
        assert_eq!(outer.len(), 8);
        assert!(TokenSpan::new(4, 4).is_empty());
    }

    #[test]
    fn test_position_advance_single_line() {
        let mut pos = Position::START;
        pos.advance("let");
        assert_eq!(pos, Position::new(3, 1, 4));
    }

    #[test]
    fn test_position_advance_crlf_is_one_line() {
        let mut pos = Position::START;
        pos.advance("a\r\nb");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 4);
    }

    #[test]
    fn test_position_advance_counts_chars_not_bytes() {
        let mut pos = Position::START;
        pos.advance("é\u{2028}ü");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 2 + 3 + 2);
    }
}
