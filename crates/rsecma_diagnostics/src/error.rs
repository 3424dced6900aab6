//! The structured, chained parse error.
//!
//! A [`ParseError`] is a stack of frames. The outermost frame names the entry
//! production; each `Nested` cause holds the frame of the production that
//! failed inside it, down to the deepest frame whose cause is a concrete
//! mismatch. Every frame remembers the token its production was looking at.

use crate::lexical::LexicalError;
use crate::messages;
use rsecma_ast::{ConversionError, Token, TokenKind};
use rsecma_core::{Position, TextSpan};
use thiserror::Error;

/// The token a production was positioned at when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorToken {
    pub kind: TokenKind,
    pub pos: Position,
    /// Index into the token buffer.
    pub index: u32,
    /// Length of the token's raw text in bytes.
    pub len: u32,
}

impl ErrorToken {
    pub fn new(token: &Token<'_>, index: u32) -> Self {
        Self {
            kind: token.kind,
            pos: token.pos,
            index,
            len: token.raw.len() as u32,
        }
    }

    /// The byte span of the token in its source.
    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.pos.offset, self.len)
    }

    /// The token's text, looked up in the source it was scanned from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span().to_range()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorCause {
    #[error(transparent)]
    Lexical(LexicalError),
    /// The named construct was required here.
    #[error("expected {0}")]
    Expected(&'static str),
    /// A specific token was required here.
    #[error("expected {}", quote_token(.0))]
    ExpectedToken(TokenKind),
    #[error(transparent)]
    Conversion(ConversionError),
    /// Nesting went deeper than the configured limit. Fatal.
    #[error("nesting depth limit of {limit} exceeded")]
    DepthExceeded { limit: u32 },
    #[error(transparent)]
    Nested(ParseError),
}

/// One production's view of a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorFrame {
    pub cause: ErrorCause,
    pub production: &'static str,
    pub token: ErrorToken,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.0))]
pub struct ParseError(Box<ErrorFrame>);

impl ParseError {
    pub fn new(cause: ErrorCause, production: &'static str, token: ErrorToken) -> Self {
        Self(Box::new(ErrorFrame {
            cause,
            production,
            token,
        }))
    }

    pub fn expected(what: &'static str, production: &'static str, token: ErrorToken) -> Self {
        Self::new(ErrorCause::Expected(what), production, token)
    }

    /// Wrap this error in a frame for the enclosing production.
    pub fn within(self, production: &'static str, token: ErrorToken) -> Self {
        Self::new(ErrorCause::Nested(self), production, token)
    }

    /// The outermost frame.
    #[inline]
    pub fn frame(&self) -> &ErrorFrame {
        &self.0
    }

    /// Frames from the entry production down to the deepest failure.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(&self.0) }
    }

    /// The frame where matching actually gave up.
    pub fn deepest(&self) -> &ErrorFrame {
        let mut frame: &ErrorFrame = &self.0;
        while let ErrorCause::Nested(inner) = &frame.cause {
            frame = &inner.0;
        }
        frame
    }

    /// Production names from the entry point to the deepest failure.
    pub fn productions(&self) -> Vec<&'static str> {
        self.chain().map(|f| f.production).collect()
    }

    /// The concrete cause at the bottom of the chain.
    pub fn root_cause(&self) -> &ErrorCause {
        &self.deepest().cause
    }

    /// The token at the deepest failure.
    pub fn token(&self) -> &ErrorToken {
        &self.deepest().token
    }

    pub fn position(&self) -> Position {
        self.token().pos
    }

    /// Whether alternative exploration must stop at this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root_cause(),
            ErrorCause::DepthExceeded { .. } | ErrorCause::Lexical(_)
        )
    }

    /// Of two failed alternatives, keep the one that got further into the
    /// input. On a tie `self`, the earlier alternative, wins.
    pub fn furthest(self, other: ParseError) -> ParseError {
        if other.token().index > self.token().index {
            other
        } else {
            self
        }
    }

    /// Stable diagnostic code of the root cause.
    pub fn code(&self) -> u32 {
        match self.root_cause() {
            ErrorCause::Lexical(err) => err.code(),
            ErrorCause::Expected(_) | ErrorCause::ExpectedToken(_) => messages::EXPECTED.code,
            ErrorCause::Conversion(_) => messages::INVALID_CONVERSION.code,
            ErrorCause::DepthExceeded { .. } => messages::DEPTH_EXCEEDED.code,
            ErrorCause::Nested(_) => messages::EXPECTED.code,
        }
    }

    /// A short message for the root cause, without location or chain.
    pub fn message(&self) -> String {
        self.root_cause().to_string()
    }
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> Self {
        let token = ErrorToken {
            kind: TokenKind::EndOfInput,
            pos: err.pos,
            index: 0,
            len: 0,
        };
        ParseError::new(ErrorCause::Lexical(err), "Tokenize", token)
    }
}

/// Iterator over the frames of a [`ParseError`], outermost first.
pub struct Chain<'a> {
    next: Option<&'a ErrorFrame>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ErrorFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = match &frame.cause {
            ErrorCause::Nested(inner) => Some(&inner.0),
            _ => None,
        };
        Some(frame)
    }
}

/// Punctuators and keywords are quoted, token classes are not.
fn quote_token(kind: &TokenKind) -> String {
    match kind.punctuation_text().or_else(|| kind.keyword_text()) {
        Some(text) => format!("`{}`", text),
        None => kind.describe().to_string(),
    }
}

/// "expected X while parsing Y at line:col (A > B > Y)"
fn render(frame: &ErrorFrame) -> String {
    let mut deepest = frame;
    let mut names = vec![frame.production];
    while let ErrorCause::Nested(inner) = &deepest.cause {
        deepest = &inner.0;
        names.push(deepest.production);
    }
    // Lexical errors carry their own position.
    let cause = match &deepest.cause {
        ErrorCause::Lexical(err) => err.kind.to_string(),
        other => other.to_string(),
    };
    format!(
        "{} while parsing {} at {} ({})",
        cause,
        deepest.production,
        deepest.token.pos,
        names.join(" > ")
    )
}
