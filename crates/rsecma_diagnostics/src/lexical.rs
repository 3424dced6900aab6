//! Lexical errors raised by the scanner. Scanning stops at the first one.

use crate::messages::{self, DiagnosticMessage};
use rsecma_core::Position;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedComment,
    UnterminatedRegex,
    InvalidEscape,
    InvalidNumber,
    InvalidIdentifierEscape,
    /// A closing bracket that does not match the innermost open one.
    MismatchedBracket(char),
    /// A bracket still open at end of input.
    UnclosedBracket(char),
}

impl LexicalErrorKind {
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            LexicalErrorKind::UnexpectedCharacter(_) => &messages::UNEXPECTED_CHARACTER,
            LexicalErrorKind::UnterminatedString => &messages::UNTERMINATED_STRING,
            LexicalErrorKind::UnterminatedTemplate => &messages::UNTERMINATED_TEMPLATE,
            LexicalErrorKind::UnterminatedComment => &messages::UNTERMINATED_COMMENT,
            LexicalErrorKind::UnterminatedRegex => &messages::UNTERMINATED_REGEX,
            LexicalErrorKind::InvalidEscape => &messages::INVALID_ESCAPE,
            LexicalErrorKind::InvalidNumber => &messages::INVALID_NUMBER,
            LexicalErrorKind::InvalidIdentifierEscape => &messages::INVALID_IDENTIFIER_ESCAPE,
            LexicalErrorKind::MismatchedBracket(_) => &messages::MISMATCHED_BRACKET,
            LexicalErrorKind::UnclosedBracket(_) => &messages::UNCLOSED_BRACKET,
        }
    }
}

impl fmt::Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();
        match self {
            LexicalErrorKind::UnexpectedCharacter(c)
            | LexicalErrorKind::MismatchedBracket(c)
            | LexicalErrorKind::UnclosedBracket(c) => {
                let mut buf = [0u8; 4];
                f.write_str(&message.format(&[c.encode_utf8(&mut buf)]))
            }
            _ => f.write_str(message.message),
        }
    }
}

/// A malformed token and the position where scanning gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {pos}")]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub pos: Position,
}

impl LexicalError {
    #[inline]
    pub fn new(kind: LexicalErrorKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    pub fn code(&self) -> u32 {
        self.kind.message().code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = LexicalError::new(LexicalErrorKind::UnterminatedString, Position::new(4, 2, 3));
        assert_eq!(err.to_string(), "unterminated string literal at 2:3");
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn test_display_with_character() {
        let err = LexicalError::new(LexicalErrorKind::MismatchedBracket(')'), Position::START);
        assert_eq!(err.to_string(), "mismatched closing ')' at 1:1");
    }
}
