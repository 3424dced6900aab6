//! Turns the scanner's raw tokens into a [`TokenBuffer`] of positioned tokens.

use crate::scanner::{ScanError, Scanner};
use rsecma_ast::{Token, TokenBuffer, TokenKind};
use rsecma_core::Position;
use rsecma_diagnostics::LexicalError;

/// Scan `text` to the end, attaching a line/column position to every token.
///
/// The last token is always a zero-length `EndOfInput`. The first lexical
/// error aborts the whole scan.
pub fn annotate(text: &str) -> Result<TokenBuffer<'_>, LexicalError> {
    let mut scanner = Scanner::new(text);
    // Source text averages a little over three bytes per token.
    let mut tokens = Vec::with_capacity(text.len() / 3 + 1);
    let mut pos = Position::START;

    loop {
        let kind = match scanner.scan() {
            Ok(kind) => kind,
            Err(err) => return Err(locate(text, pos, err)),
        };
        let raw = scanner.token_text();
        tokens.push(Token::new(kind, raw, pos));
        if kind == TokenKind::EndOfInput {
            break;
        }
        pos.advance(raw);
    }

    tracing::debug!(
        bytes = text.len(),
        tokens = tokens.len(),
        lines = pos.line,
        "tokenized input"
    );
    Ok(TokenBuffer::new(text, tokens))
}

/// Resolve a scan error's byte offset by advancing from the start of the
/// token that was being scanned.
fn locate(text: &str, mut pos: Position, err: ScanError) -> LexicalError {
    let from = pos.offset as usize;
    if let Some(gap) = text.get(from..err.offset.max(from)) {
        pos.advance(gap);
    }
    LexicalError::new(err.kind, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsecma_diagnostics::LexicalErrorKind;

    #[test]
    fn test_positions_follow_lines() {
        let buffer = annotate("a\r\n  b").unwrap();
        let tokens = buffer.tokens();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].kind, TokenKind::LineTerminator);
        assert_eq!(tokens[1].raw, "\r\n");
        assert_eq!(tokens[3].pos, Position::new(5, 2, 3));
        assert_eq!(tokens[4].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[4].pos.offset, 6);
    }

    #[test]
    fn test_error_position_inside_token() {
        let err = annotate("x = \"ab\\u12\"").unwrap_err();
        assert_eq!(err.kind, LexicalErrorKind::InvalidEscape);
        assert_eq!(err.pos, Position::new(7, 1, 8));
    }

    #[test]
    fn test_columns_count_characters() {
        let buffer = annotate("'é' + x").unwrap();
        let x = buffer.significant().nth(2).unwrap();
        assert_eq!(x.raw, "x");
        assert_eq!(x.pos.column, 7);
    }
}
