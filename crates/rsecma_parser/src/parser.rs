//! The backtracking recursive-descent parser.
//!
//! Every grammar production is a method on [`Parser`] that consumes into a
//! [`Goal`]. A production that may fail as one alternative among several
//! runs through [`Parser::production`], which gives it a fresh child goal,
//! commits that goal on success, and on failure wraps the error in a frame
//! naming the production. The parent goal is untouched by a failed attempt,
//! so the next alternative starts from the same token.

use crate::context::Context;
use crate::cursor::Goal;
use crate::options::ParseOptions;
use rsecma_ast::{Statement, Token, TokenKind};
use rsecma_diagnostics::{ErrorCause, ErrorToken, ParseError};
use tracing::trace;

pub type PResult<T> = Result<T, ParseError>;

/// Failure inside a production body, before the production adds its frame.
#[derive(Debug)]
pub(crate) enum Fail {
    /// The body itself gave up at this token.
    Here(ErrorCause, ErrorToken),
    /// A nested production failed; its chain is complete.
    Nested(ParseError),
}

impl Fail {
    /// Token index of the deepest failure.
    fn index(&self) -> u32 {
        match self {
            Fail::Here(_, token) => token.index,
            Fail::Nested(err) => err.token().index,
        }
    }

    /// Of two failed alternatives, keep the one that got further. Ties go to
    /// `self`, the alternative tried first.
    pub(crate) fn furthest(self, other: Fail) -> Fail {
        if other.index() > self.index() {
            other
        } else {
            self
        }
    }
}

impl From<ParseError> for Fail {
    fn from(err: ParseError) -> Self {
        Fail::Nested(err)
    }
}

/// The outcome of a production body.
pub(crate) type Step<T> = Result<T, Fail>;

pub struct Parser<'b, 'src> {
    tokens: &'b [Token<'src>],
    pub(crate) options: ParseOptions,
    /// Current statement / expression / pattern / type nesting.
    depth: u32,
}

impl<'b, 'src> Parser<'b, 'src> {
    pub fn new(tokens: &'b [Token<'src>], options: ParseOptions) -> Self {
        Self {
            tokens,
            options,
            depth: 0,
        }
    }

    /// A cursor over the whole buffer.
    pub fn root(&self) -> Goal<'b, 'src> {
        Goal::root(self.tokens)
    }

    #[inline]
    pub(crate) fn typescript(&self) -> bool {
        self.options.typescript
    }

    // ========================================================================
    // Production wrappers
    // ========================================================================

    /// Run `body` on a child of `parent`. Commits on success; on failure the
    /// child is dropped and the error gains a frame for `name`.
    pub(crate) fn production<T>(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        name: &'static str,
        body: impl FnOnce(&mut Self, &mut Goal<'b, 'src>) -> Step<T>,
    ) -> PResult<T> {
        let mut goal = parent.child();
        trace!(production = name, token = goal.peek_index(), "attempt");
        match body(self, &mut goal) {
            Ok(value) => {
                parent.commit(goal);
                Ok(value)
            }
            Err(fail) => {
                let err = match fail {
                    Fail::Here(cause, token) => ParseError::new(cause, name, token),
                    Fail::Nested(inner) => inner.within(name, parent.error_token()),
                };
                trace!(
                    production = name,
                    token = err.token().index,
                    cause = %err.message(),
                    "failed"
                );
                Err(err)
            }
        }
    }

    /// Like [`Parser::production`], counting one level of nesting. Going past
    /// `max_depth` fails with the fatal `DepthExceeded`.
    pub(crate) fn nested<T>(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        name: &'static str,
        body: impl FnOnce(&mut Self, &mut Goal<'b, 'src>) -> Step<T>,
    ) -> PResult<T> {
        let limit = self.options.max_depth;
        if self.depth >= limit {
            return Err(parent.error(ErrorCause::DepthExceeded { limit }, name));
        }
        self.depth += 1;
        let result = self.production(parent, name, body);
        self.depth -= 1;
        result
    }

    /// A production whose absence is not an error: a non-fatal failure is
    /// `Ok(None)` and leaves `parent` where it was.
    pub(crate) fn optional<T>(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        name: &'static str,
        body: impl FnOnce(&mut Self, &mut Goal<'b, 'src>) -> Step<T>,
    ) -> PResult<Option<T>> {
        match self.production(parent, name, body) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_fatal() => Err(err),
            Err(_) => Ok(None),
        }
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// `Script` or `Module`, depending on the options. Consumes everything,
    /// `EndOfInput` included.
    pub fn parse_program(&mut self, root: &mut Goal<'b, 'src>) -> PResult<Vec<Statement<'src>>> {
        let module = self.options.is_module();
        let (name, ctx) = if module {
            ("Module", Context::AWAIT)
        } else {
            ("Script", Context::empty())
        };
        self.production(root, name, |p, g| {
            let body = p.parse_items(g, ctx, module, TokenKind::EndOfInput)?;
            g.expect(TokenKind::EndOfInput)?;
            Ok(body)
        })
    }
}
