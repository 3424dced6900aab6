//! Tokens and the immutable token buffer shared by every cursor of one parse.

use crate::token_kind::TokenKind;
use rsecma_core::{Position, TextSpan, TokenSpan};
use serde::Serialize;

/// A scanned token: its kind, the exact source slice, and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub raw: &'src str,
    pub pos: Position,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, raw: &'src str, pos: Position) -> Self {
        Self { kind, raw, pos }
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Whether this token is the identifier spelled exactly `word`.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.raw == word
    }

    /// Whether this token is, or contains, a line terminator. Only
    /// `LineTerminator` tokens and multi-line comments spanning lines count.
    pub fn has_line_terminator(&self) -> bool {
        match self.kind {
            TokenKind::LineTerminator => true,
            TokenKind::MultiLineComment => self
                .raw
                .chars()
                .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')),
            _ => false,
        }
    }

    /// Byte offset just past this token.
    #[inline]
    pub fn end_offset(&self) -> u32 {
        self.pos.offset + self.raw.len() as u32
    }
}

/// Every token of one input, trivia included, terminated by `EndOfInput`.
///
/// The raw slices tile the source: concatenating them reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBuffer<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenBuffer<'src> {
    /// Build a buffer. The caller guarantees the tokens tile `source` and end
    /// with a zero-length `EndOfInput` token.
    pub fn new(source: &'src str, tokens: Vec<Token<'src>>) -> Self {
        debug_assert!(matches!(tokens.last(), Some(t) if t.kind == TokenKind::EndOfInput));
        Self { source, tokens }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    /// The span of the whole buffer, `EndOfInput` included.
    #[inline]
    pub fn full_span(&self) -> TokenSpan {
        TokenSpan::new(0, self.tokens.len() as u32)
    }

    /// Iterate over the non-trivia tokens.
    pub fn significant(&self) -> impl Iterator<Item = &Token<'src>> + '_ {
        self.tokens.iter().filter(|t| !t.is_trivia())
    }

    /// Byte range of the source covered by a token span.
    pub fn byte_span(&self, span: TokenSpan) -> TextSpan {
        let start = self.offset_at(span.start);
        let end = if span.is_empty() {
            start
        } else {
            self.tokens
                .get(span.end as usize - 1)
                .map_or(self.source.len() as u32, Token::end_offset)
        };
        TextSpan::from_bounds(start, end)
    }

    /// The exact source text covered by a token span.
    pub fn text_of(&self, span: TokenSpan) -> &'src str {
        let bytes = self.byte_span(span);
        &self.source[bytes.to_range()]
    }

    fn offset_at(&self, index: u32) -> u32 {
        self.tokens
            .get(index as usize)
            .map_or(self.source.len() as u32, |t| t.pos.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(source: &str) -> TokenBuffer<'_> {
        // "a = 1" as five tokens plus EndOfInput
        let parts = [
            (TokenKind::Identifier, 0, 1),
            (TokenKind::Whitespace, 1, 2),
            (TokenKind::EqualsToken, 2, 3),
            (TokenKind::Whitespace, 3, 4),
            (TokenKind::NumericLiteral, 4, 5),
            (TokenKind::EndOfInput, 5, 5),
        ];
        let tokens = parts
            .iter()
            .map(|&(kind, s, e)| Token::new(kind, &source[s..e], Position::new(s as u32, 1, s as u32 + 1)))
            .collect();
        TokenBuffer::new(source, tokens)
    }

    #[test]
    fn test_text_of_spans() {
        let buf = buffer("a = 1");
        assert_eq!(buf.text_of(buf.full_span()), "a = 1");
        assert_eq!(buf.text_of(TokenSpan::new(1, 5)), " = 1");
        assert_eq!(buf.text_of(TokenSpan::new(2, 2)), "");
        assert_eq!(buf.byte_span(TokenSpan::new(2, 3)), TextSpan::new(2, 1));
    }

    #[test]
    fn test_significant_skips_trivia() {
        let buf = buffer("a = 1");
        let kinds: Vec<_> = buf.significant().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::EqualsToken,
                TokenKind::NumericLiteral,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_line_terminator_in_comment() {
        let pos = Position::START;
        assert!(Token::new(TokenKind::MultiLineComment, "/*\n*/", pos).has_line_terminator());
        assert!(!Token::new(TokenKind::MultiLineComment, "/* */", pos).has_line_terminator());
        assert!(!Token::new(TokenKind::SingleLineComment, "// x", pos).has_line_terminator());
    }
}
