//! The backtracking cursor.
//!
//! A [`Goal`] is a window `(start, len)` over the shared token buffer. A
//! production makes a child goal positioned at its parent's end, consumes
//! tokens into it, and on success commits it, which grows the parent by the
//! child's length. A failed child is simply dropped. Nothing is re-scanned or
//! copied when backtracking.
//!
//! Consuming a significant token always consumes the trivia before it, so a
//! goal's span includes the leading trivia of its first token.

use crate::parser::Fail;
use crate::precedence::GtOperator;
use rsecma_ast::{ConversionError, Token, TokenKind};
use rsecma_core::TokenSpan;
use rsecma_diagnostics::{ErrorCause, ErrorToken, ParseError};

#[derive(Debug, Clone)]
pub struct Goal<'b, 'src> {
    tokens: &'b [Token<'src>],
    start: u32,
    len: u32,
}

impl<'b, 'src> Goal<'b, 'src> {
    /// A goal over a whole buffer, which must end with `EndOfInput`.
    pub fn root(tokens: &'b [Token<'src>]) -> Self {
        debug_assert!(matches!(tokens.last(), Some(t) if t.kind == TokenKind::EndOfInput));
        Self {
            tokens,
            start: 0,
            len: 0,
        }
    }

    /// A zero-length goal positioned at this goal's end.
    #[inline]
    pub fn child(&self) -> Self {
        Self {
            tokens: self.tokens,
            start: self.end(),
            len: 0,
        }
    }

    /// Absorb a successful child. The child must have started at our end.
    #[inline]
    pub fn commit(&mut self, child: Goal<'b, 'src>) {
        debug_assert_eq!(child.start, self.end());
        self.len += child.len;
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The tokens consumed so far.
    #[inline]
    pub fn span(&self) -> TokenSpan {
        TokenSpan::new(self.start, self.end())
    }

    /// The tokens consumed since `start`, an earlier value of `end()`.
    #[inline]
    pub fn since(&self, start: u32) -> TokenSpan {
        TokenSpan::new(start, self.end())
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    /// Index of the first significant token at or after `from`.
    fn significant_from(&self, from: usize) -> usize {
        let last = self.tokens.len() - 1;
        let mut index = from.min(last);
        while index < last && self.tokens[index].is_trivia() {
            index += 1;
        }
        index
    }

    /// Index of the next significant token.
    #[inline]
    pub fn peek_index(&self) -> usize {
        self.significant_from(self.end() as usize)
    }

    /// Index of the `n`th significant token ahead, stopping at end of input.
    pub fn peek_nth_index(&self, n: usize) -> usize {
        let mut index = self.peek_index();
        for _ in 0..n {
            if self.tokens[index].kind == TokenKind::EndOfInput {
                break;
            }
            index = self.significant_from(index + 1);
        }
        index
    }

    #[inline]
    pub fn peek(&self) -> &'b Token<'src> {
        &self.tokens[self.peek_index()]
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    #[inline]
    pub fn peek_nth(&self, n: usize) -> &'b Token<'src> {
        &self.tokens[self.peek_nth_index(n)]
    }

    #[inline]
    pub fn peek_nth_kind(&self, n: usize) -> TokenKind {
        self.peek_nth(n).kind
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Whether the next token is the identifier `word`.
    #[inline]
    pub fn at_word(&self, word: &str) -> bool {
        self.peek().is_word(word)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfInput)
    }

    /// Whether a line terminator separates our end from the next token.
    pub fn line_terminator_ahead(&self) -> bool {
        self.tokens[self.end() as usize..self.peek_index()]
            .iter()
            .any(Token::has_line_terminator)
    }

    /// Whether a line terminator separates the `n`th significant token ahead
    /// from the one after it.
    pub fn line_terminator_after_nth(&self, n: usize) -> bool {
        let from = self.peek_nth_index(n) + 1;
        let to = self.peek_nth_index(n + 1);
        from < to && self.tokens[from..to].iter().any(Token::has_line_terminator)
    }

    /// Index of the bracket closing the `(`, `[` or `{` at `open`. The scanner
    /// guarantees brackets balance.
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, token) in self.tokens[open..].iter().enumerate() {
            match token.kind {
                TokenKind::OpenParenToken
                | TokenKind::OpenBracketToken
                | TokenKind::OpenBraceToken
                | TokenKind::TemplateHead => depth += 1,
                TokenKind::CloseParenToken
                | TokenKind::CloseBracketToken
                | TokenKind::CloseBraceToken
                | TokenKind::TemplateTail => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(open + offset);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Kind of the first significant token after index `index`.
    pub fn kind_after(&self, index: usize) -> TokenKind {
        self.tokens[self.significant_from(index + 1)].kind
    }

    /// Whether a line terminator lies between the token at `index` and the
    /// next significant token.
    pub fn line_terminator_after(&self, index: usize) -> bool {
        let to = self.significant_from(index + 1);
        self.tokens[index + 1..to].iter().any(Token::has_line_terminator)
    }

    // ========================================================================
    // Consumption
    // ========================================================================

    /// Consume the next significant token and the trivia before it.
    pub fn skip(&mut self) -> Token<'src> {
        let index = self.peek_index();
        let new_end = (index as u32 + 1).max(self.end());
        self.len = new_end - self.start;
        self.tokens[index]
    }

    /// Consume the next token if it has the given kind.
    #[inline]
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        self.take(kind).is_some()
    }

    /// Consume and return the next token if it has the given kind.
    pub fn take(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.at(kind) {
            Some(self.skip())
        } else {
            None
        }
    }

    /// Consume the next token if it has any of the given kinds.
    pub fn accept_any(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        let kind = self.peek_kind();
        if kinds.contains(&kind) {
            self.skip();
            Some(kind)
        } else {
            None
        }
    }

    /// Consume the next token if it is the identifier `word`.
    pub fn accept_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.skip();
            true
        } else {
            false
        }
    }

    /// Consume the longest run of tokens with the given kinds.
    pub fn accept_run(&mut self, kinds: &[TokenKind]) -> usize {
        let mut count = 0;
        while self.accept_any(kinds).is_some() {
            count += 1;
        }
        count
    }

    /// A statement terminator: an explicit `;`, or an inserted one before `}`,
    /// at end of input, or after a line terminator.
    pub fn semicolon(&mut self) -> bool {
        self.accept(TokenKind::SemicolonToken)
            || self.at(TokenKind::CloseBraceToken)
            || self.at_end()
            || self.line_terminator_ahead()
    }

    /// The `>`-based operator formed by the adjacent tokens ahead, if any.
    pub fn peek_gt(&self) -> Option<GtOperator> {
        let index = self.peek_index();
        if self.tokens[index].kind != TokenKind::GreaterThanToken {
            return None;
        }
        let kind_at = |i: usize| self.tokens.get(i).map(|t| t.kind);
        let mut count: u32 = 1;
        while count < 3 && kind_at(index + count as usize) == Some(TokenKind::GreaterThanToken) {
            count += 1;
        }
        let assign = kind_at(index + count as usize) == Some(TokenKind::EqualsToken);
        Some(GtOperator::from_parts(count, assign))
    }

    /// Consume the tokens of a `>`-based operator returned by `peek_gt`.
    pub fn accept_gt(&mut self, op: GtOperator) {
        self.skip();
        self.len += op.token_count() - 1;
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// The next significant token, as recorded in errors.
    pub fn error_token(&self) -> ErrorToken {
        let index = self.peek_index();
        ErrorToken::new(&self.tokens[index], index as u32)
    }

    /// The first significant token of `span`.
    pub fn first_token_of(&self, span: TokenSpan) -> ErrorToken {
        let index = self.significant_from(span.start as usize);
        ErrorToken::new(&self.tokens[index], index as u32)
    }

    /// A complete error frame for `production` at the next token.
    pub fn error(&self, cause: ErrorCause, production: &'static str) -> ParseError {
        ParseError::new(cause, production, self.error_token())
    }

    /// The named construct is required at the next token.
    #[inline]
    pub(crate) fn expected(&self, what: &'static str) -> Fail {
        Fail::Here(ErrorCause::Expected(what), self.error_token())
    }

    #[inline]
    pub(crate) fn fail(&self, cause: ErrorCause) -> Fail {
        Fail::Here(cause, self.error_token())
    }

    /// A failed cover conversion, reported at the start of the offending node.
    pub(crate) fn conversion(&self, err: ConversionError) -> Fail {
        Fail::Here(ErrorCause::Conversion(err), self.first_token_of(err.span()))
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, Fail> {
        self.take(kind)
            .ok_or_else(|| self.fail(ErrorCause::ExpectedToken(kind)))
    }

    /// Consume the identifier `word` or fail.
    pub(crate) fn expect_word(&mut self, word: &'static str) -> Result<(), Fail> {
        if self.accept_word(word) {
            Ok(())
        } else {
            Err(self.expected(word))
        }
    }

    /// Require a statement terminator.
    pub(crate) fn expect_semicolon(&mut self) -> Result<(), Fail> {
        if self.semicolon() {
            Ok(())
        } else {
            Err(self.fail(ErrorCause::ExpectedToken(TokenKind::SemicolonToken)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsecma_ast::TokenBuffer;

    fn buffer(source: &str) -> TokenBuffer<'_> {
        rsecma_scanner::tokenize(source).unwrap()
    }

    #[test]
    fn test_child_commit_and_discard() {
        let buf = buffer("a b c");
        let mut root = Goal::root(buf.tokens());

        let mut child = root.child();
        assert!(child.accept(TokenKind::Identifier));
        root.commit(child);
        assert_eq!(root.span(), TokenSpan::new(0, 1));

        let mut failed = root.child();
        failed.skip();
        failed.skip();
        drop(failed);
        assert_eq!(root.end(), 1);

        // The whitespace before `b` is consumed with it.
        let mut child = root.child();
        assert_eq!(child.skip().raw, "b");
        assert_eq!(child.span(), TokenSpan::new(1, 3));
        root.commit(child);
        assert_eq!(root.peek().raw, "c");
    }

    #[test]
    fn test_peek_skips_trivia() {
        let buf = buffer("/* x */ a\n// y\nb");
        let root = Goal::root(buf.tokens());
        assert_eq!(root.peek().raw, "a");
        assert_eq!(root.peek_nth(1).raw, "b");
        assert_eq!(root.peek_nth_kind(2), TokenKind::EndOfInput);
        assert_eq!(root.peek_nth_kind(9), TokenKind::EndOfInput);
        assert!(root.line_terminator_after_nth(0));
        assert!(!root.line_terminator_ahead());
    }

    #[test]
    fn test_skip_at_end_stays_at_end() {
        let buf = buffer("  ");
        let mut root = Goal::root(buf.tokens());
        assert_eq!(root.skip().kind, TokenKind::EndOfInput);
        assert_eq!(root.end(), 2);
        assert_eq!(root.skip().kind, TokenKind::EndOfInput);
        assert_eq!(root.end(), 2);
    }

    #[test]
    fn test_semicolon_insertion_points() {
        let buf = buffer("{ a\nb } c");
        let mut root = Goal::root(buf.tokens());
        root.skip();
        assert!(!root.semicolon());
        root.skip();
        assert!(root.semicolon());
        root.skip();
        assert!(root.semicolon());
        root.skip();
        assert!(!root.semicolon());
    }

    #[test]
    fn test_greater_than_recombination() {
        let buf = buffer("a >>>= b > = c");
        let mut root = Goal::root(buf.tokens());
        root.skip();
        let op = root.peek_gt().unwrap();
        assert_eq!(op, GtOperator::UnsignedShiftRightAssign);
        root.accept_gt(op);
        assert_eq!(root.peek().raw, "b");
        root.skip();
        // Separated by whitespace: only a plain `>`.
        assert_eq!(root.peek_gt(), Some(GtOperator::GreaterThan));
    }

    #[test]
    fn test_matching_close() {
        let buf = buffer("(a, [b], `${c}`) => d");
        let root = Goal::root(buf.tokens());
        let close = root.matching_close(root.peek_index()).unwrap();
        assert_eq!(buf.tokens()[close].kind, TokenKind::CloseParenToken);
        assert_eq!(root.kind_after(close), TokenKind::EqualsGreaterThanToken);
    }
}
