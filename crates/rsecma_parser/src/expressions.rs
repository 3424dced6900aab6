//! Expressions, from `Expression` down to primary expressions.
//!
//! Binary operators use precedence climbing over [`Tier`]. Arrow functions,
//! parenthesized expressions and assignment patterns share the cover
//! grammar: the generic parse is converted once the following token decides
//! what it was.

use crate::context::Context;
use crate::cursor::Goal;
use crate::parser::{Fail, PResult, Parser, Step};
use crate::precedence::{assignment_operator, binary_operator, GtOperator, Tier};
use rsecma_ast::*;
use rsecma_core::TokenSpan;
use rsecma_diagnostics::ErrorCause;

/// How an arrow function was recognized by lookahead.
#[derive(Debug, Clone, Copy)]
struct ArrowShape {
    is_async: bool,
    /// `=>` was seen, so the input cannot be anything else.
    definite: bool,
}

fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    let op = match kind {
        TokenKind::MinusToken => UnaryOperator::Minus,
        TokenKind::PlusToken => UnaryOperator::Plus,
        TokenKind::ExclamationToken => UnaryOperator::LogicalNot,
        TokenKind::TildeToken => UnaryOperator::BitwiseNot,
        TokenKind::TypeOfKeyword => UnaryOperator::TypeOf,
        TokenKind::VoidKeyword => UnaryOperator::Void,
        TokenKind::DeleteKeyword => UnaryOperator::Delete,
        _ => return None,
    };
    Some(op)
}

fn update_operator(kind: TokenKind) -> Option<UpdateOperator> {
    match kind {
        TokenKind::PlusPlusToken => Some(UpdateOperator::Increment),
        TokenKind::MinusMinusToken => Some(UpdateOperator::Decrement),
        _ => None,
    }
}

/// Whether `kind` can begin the operand of `yield`.
fn starts_operand(kind: TokenKind) -> bool {
    match kind {
        TokenKind::PlusToken | TokenKind::MinusToken | TokenKind::LessThanToken => true,
        k if k.is_assignment_operator() || binary_operator(k).is_some() => false,
        TokenKind::CloseParenToken
        | TokenKind::CloseBracketToken
        | TokenKind::CloseBraceToken
        | TokenKind::CommaToken
        | TokenKind::SemicolonToken
        | TokenKind::ColonToken
        | TokenKind::QuestionToken
        | TokenKind::GreaterThanToken
        | TokenKind::EqualsGreaterThanToken
        | TokenKind::DotToken
        | TokenKind::QuestionDotToken
        | TokenKind::TemplateMiddle
        | TokenKind::TemplateTail
        | TokenKind::EndOfInput => false,
        _ => true,
    }
}

/// Whether `kind` can begin a property name in an object or class body.
pub(crate) fn starts_property_name(kind: TokenKind) -> bool {
    kind.is_identifier_name()
        || matches!(
            kind,
            TokenKind::StringLiteral
                | TokenKind::NumericLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::OpenBracketToken
                | TokenKind::PrivateName
        )
}

fn is_unary_like(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Unary(_) | Expression::Await(_))
}

fn binary<'src>(
    left: Expression<'src>,
    operator: BinaryOperator,
    right: Expression<'src>,
) -> Expression<'src> {
    let span = TokenSpan::new(left.span().start, right.span().end);
    Expression::Binary(Box::new(BinaryExpression {
        span,
        left,
        operator,
        right,
    }))
}

impl<'b, 'src> Parser<'b, 'src> {
    // ========================================================================
    // Names
    // ========================================================================

    /// An identifier usable as a reference or binding in `ctx`.
    pub(crate) fn parse_identifier(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<Identifier<'src>> {
        let token = g.peek();
        if token.kind != TokenKind::Identifier || ctx.reserves(token.raw) {
            return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::Identifier)));
        }
        let start = g.end();
        let token = g.skip();
        Ok(Identifier {
            span: g.since(start),
            name: token.raw,
        })
    }

    /// Any `IdentifierName`, reserved words included.
    pub(crate) fn parse_identifier_name(&mut self, g: &mut Goal<'b, 'src>) -> Step<Identifier<'src>> {
        if !g.peek_kind().is_identifier_name() {
            return Err(g.expected("identifier name"));
        }
        let start = g.end();
        let token = g.skip();
        Ok(Identifier {
            span: g.since(start),
            name: token.raw,
        })
    }

    pub(crate) fn parse_private_name(&mut self, g: &mut Goal<'b, 'src>) -> Step<PrivateName<'src>> {
        let start = g.end();
        let token = g.expect(TokenKind::PrivateName)?;
        Ok(PrivateName {
            span: g.since(start),
            name: token.raw.trim_start_matches('#'),
        })
    }

    pub(crate) fn parse_literal(&mut self, g: &mut Goal<'b, 'src>) -> Step<Literal<'src>> {
        let kind = match g.peek_kind() {
            TokenKind::NullKeyword => LiteralKind::Null,
            TokenKind::TrueKeyword => LiteralKind::Boolean(true),
            TokenKind::FalseKeyword => LiteralKind::Boolean(false),
            TokenKind::NumericLiteral => LiteralKind::Numeric,
            TokenKind::BigIntLiteral => LiteralKind::BigInt,
            TokenKind::StringLiteral => LiteralKind::String,
            TokenKind::RegularExpressionLiteral => LiteralKind::RegExp,
            _ => return Err(g.expected("literal")),
        };
        let start = g.end();
        let token = g.skip();
        Ok(Literal {
            span: g.since(start),
            kind,
            raw: token.raw,
        })
    }

    pub(crate) fn parse_string_literal(&mut self, g: &mut Goal<'b, 'src>) -> Step<Literal<'src>> {
        if !g.at(TokenKind::StringLiteral) {
            return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::StringLiteral)));
        }
        self.parse_literal(g)
    }

    // ========================================================================
    // Expression and AssignmentExpression
    // ========================================================================

    /// `Expression`: one or more comma-separated assignment expressions.
    pub(crate) fn parse_expression(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<Expression<'src>> {
        let start = g.end();
        let first = self.parse_assignment(g, ctx)?;
        if !g.at(TokenKind::CommaToken) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while g.accept(TokenKind::CommaToken) {
            expressions.push(self.parse_assignment(g, ctx)?);
        }
        Ok(Expression::Sequence(Box::new(SequenceExpression {
            span: g.since(start),
            expressions,
        })))
    }

    pub(crate) fn parse_assignment(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Expression<'src>> {
        self.nested(parent, "AssignmentExpression", |p, g| {
            if ctx.contains(Context::YIELD) && g.at_word("yield") {
                return p.parse_yield(g, ctx);
            }
            let mut arrow_failure = None;
            if let Some(shape) = p.arrow_ahead(g) {
                match p.parse_arrow_function(g, ctx, shape.is_async) {
                    Ok(arrow) => return Ok(arrow),
                    Err(err) if shape.definite || err.is_fatal() => return Err(err.into()),
                    Err(err) => arrow_failure = Some(err),
                }
            }
            match p.parse_conditional_assignment(g, ctx) {
                Ok(expr) => Ok(expr),
                Err(fail) => Err(match arrow_failure {
                    Some(arrow) => Fail::Nested(arrow).furthest(fail),
                    None => fail,
                }),
            }
        })
    }

    /// A conditional expression, optionally the target of an assignment.
    fn parse_conditional_assignment(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<Expression<'src>> {
        let start = g.end();
        let expr = self.parse_conditional(g, ctx)?;

        let operator = match assignment_operator(g.peek_kind()) {
            Some(op) => {
                g.skip();
                op
            }
            None => match g.peek_gt() {
                Some(gt) => match gt.assignment() {
                    Some(op) => {
                        g.accept_gt(gt);
                        op
                    }
                    None => return Ok(expr),
                },
                None => return Ok(expr),
            },
        };

        let target = if operator == AssignmentOperator::Assign {
            AssignmentTarget::try_from(expr)
        } else {
            SimpleAssignmentTarget::try_from(expr).map(AssignmentTarget::Simple)
        }
        .map_err(|err| g.conversion(err))?;

        let value = self.parse_assignment(g, ctx)?;
        Ok(Expression::Assignment(Box::new(AssignmentExpression {
            span: g.since(start),
            operator,
            target,
            value,
        })))
    }

    fn parse_yield(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let start = g.end();
        g.skip();
        let mut delegate = false;
        let mut argument = None;
        if !g.line_terminator_ahead() {
            if g.accept(TokenKind::AsteriskToken) {
                delegate = true;
                argument = Some(self.parse_assignment(g, ctx)?);
            } else if starts_operand(g.peek_kind()) {
                argument = Some(self.parse_assignment(g, ctx)?);
            }
        }
        Ok(Expression::Yield(Box::new(YieldExpression {
            span: g.since(start),
            delegate,
            argument,
        })))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Recognize the start of an arrow function without consuming anything.
    fn arrow_ahead(&self, g: &Goal<'b, 'src>) -> Option<ArrowShape> {
        let ts = self.typescript();
        let paren_shape = |open: usize, is_async: bool| {
            let close = g.matching_close(open)?;
            match g.kind_after(close) {
                TokenKind::EqualsGreaterThanToken => Some(ArrowShape {
                    is_async,
                    definite: true,
                }),
                TokenKind::ColonToken if ts => Some(ArrowShape {
                    is_async,
                    definite: false,
                }),
                _ => None,
            }
        };

        let first = g.peek();
        match first.kind {
            TokenKind::Identifier => {
                if first.raw == "async" && !g.line_terminator_after_nth(0) {
                    match g.peek_nth_kind(1) {
                        TokenKind::Identifier
                            if g.peek_nth_kind(2) == TokenKind::EqualsGreaterThanToken =>
                        {
                            return Some(ArrowShape {
                                is_async: true,
                                definite: true,
                            });
                        }
                        TokenKind::OpenParenToken => {
                            return paren_shape(g.peek_nth_index(1), true);
                        }
                        TokenKind::LessThanToken if ts => {
                            return Some(ArrowShape {
                                is_async: true,
                                definite: false,
                            });
                        }
                        _ => {}
                    }
                }
                (g.peek_nth_kind(1) == TokenKind::EqualsGreaterThanToken).then_some(ArrowShape {
                    is_async: false,
                    definite: true,
                })
            }
            TokenKind::OpenParenToken => paren_shape(g.peek_index(), false),
            TokenKind::LessThanToken if ts => Some(ArrowShape {
                is_async: false,
                definite: false,
            }),
            _ => None,
        }
    }

    fn parse_arrow_function(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
        is_async: bool,
    ) -> PResult<Expression<'src>> {
        self.production(parent, "ArrowFunction", |p, g| {
            if is_async {
                g.expect_word("async")?;
            }
            let params = if g.at(TokenKind::Identifier) {
                let id = p.parse_identifier(g, ctx)?;
                let element = BindingElement {
                    span: id.span,
                    pattern: BindingPattern::Identifier(id),
                    default: None,
                };
                FormalParameters {
                    span: element.span,
                    items: vec![element],
                    rest: None,
                }
            } else {
                p.ts_type_parameters(g)?;
                p.parse_arrow_parameters(g, ctx)?
            };
            p.ts_return_annotation(g)?;
            if g.line_terminator_ahead() {
                return Err(g.expected("`=>` on the same line as the parameters"));
            }
            g.expect(TokenKind::EqualsGreaterThanToken)?;

            let body_ctx = Context::function(is_async, false);
            let body = if g.at(TokenKind::OpenBraceToken) {
                ArrowBody::Block(p.parse_function_body(g, body_ctx)?)
            } else {
                let concise = if ctx.contains(Context::IN) {
                    body_ctx
                } else {
                    body_ctx.without_in()
                };
                ArrowBody::Expression(p.parse_assignment(g, concise)?)
            };
            Ok(Expression::Arrow(Box::new(ArrowFunction {
                span: g.span(),
                is_async,
                params,
                body,
            })))
        })
    }

    /// Parenthesized arrow parameters. The list is parsed as a cover first;
    /// TypeScript annotations make that fail, and the typed parameter
    /// grammar gets a turn.
    fn parse_arrow_parameters(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<FormalParameters<'src>> {
        let covered = self.production(g, "ArrowParameters", |p, g| {
            let cover = p.parse_cover_parenthesized(g, ctx)?;
            FormalParameters::try_from(cover).map_err(|err| g.conversion(err))
        });
        match covered {
            Ok(params) => Ok(params),
            Err(err) if !self.typescript() || err.is_fatal() => Err(err.into()),
            Err(err) => match self.parse_formal_parameters(g, ctx) {
                Ok(params) => Ok(params),
                Err(typed) => Err(Fail::Nested(err).furthest(Fail::Nested(typed))),
            },
        }
    }

    /// `( items )` where each item is an assignment expression or a rest
    /// binding. Handles `()` and a trailing comma.
    pub(crate) fn parse_cover_parenthesized(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<CoverParenthesized<'src>> {
        let start = g.end();
        g.expect(TokenKind::OpenParenToken)?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !g.at(TokenKind::CloseParenToken) {
            if g.at(TokenKind::DotDotDotToken) {
                items.push(CoverItem::Rest(self.parse_binding_rest(g, ctx)?));
            } else {
                items.push(CoverItem::Expression(self.parse_assignment(g, ctx.with_in())?));
            }
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
            trailing_comma = g.at(TokenKind::CloseParenToken);
        }
        g.expect(TokenKind::CloseParenToken)?;
        Ok(CoverParenthesized {
            span: g.since(start),
            items,
            trailing_comma,
        })
    }

    fn parse_parenthesized(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Expression<'src>> {
        self.production(parent, "ParenthesizedExpression", |p, g| {
            let cover = p.parse_cover_parenthesized(g, ctx)?;
            let paren = ParenthesizedExpression::try_from(cover).map_err(|err| g.conversion(err))?;
            Ok(Expression::Parenthesized(Box::new(paren)))
        })
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let start = g.end();
        let test = self.parse_binary(g, ctx, Tier::LogicalOr)?;
        if !g.accept(TokenKind::QuestionToken) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(g, ctx.with_in())?;
        g.expect(TokenKind::ColonToken)?;
        let alternate = self.parse_assignment(g, ctx)?;
        Ok(Expression::Conditional(Box::new(ConditionalExpression {
            span: g.since(start),
            test,
            consequent,
            alternate,
        })))
    }

    /// Binary expressions whose operators bind at `min` or tighter.
    fn parse_binary(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        min: Tier,
    ) -> Step<Expression<'src>> {
        let start = g.end();
        let mut left = self.parse_binary_operand(g, ctx, min)?;
        loop {
            if min <= Tier::Relational
                && (g.at_word("as") || g.at_word("satisfies"))
                && !g.line_terminator_ahead()
                && self.ts_type_assertion(g)?
            {
                continue;
            }
            let Some((operator, tier, gt)) = self.peek_binary(g, ctx) else {
                break;
            };
            if tier < min {
                break;
            }
            if let Expression::Binary(inner) = &left {
                let mixed = match operator {
                    BinaryOperator::Coalesce => matches!(
                        inner.operator,
                        BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd
                    ),
                    BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd => {
                        inner.operator == BinaryOperator::Coalesce
                    }
                    _ => false,
                };
                if mixed {
                    return Err(g.expected("parentheses around `??` mixed with `||` or `&&`"));
                }
            }
            match gt {
                Some(op) => g.accept_gt(op),
                None => {
                    g.skip();
                }
            }
            let operand = if operator == BinaryOperator::Coalesce {
                Tier::BitwiseOr
            } else {
                tier.next()
            };
            let right = self.parse_binary(g, ctx, operand)?;
            left = Expression::Binary(Box::new(BinaryExpression {
                span: g.since(start),
                left,
                operator,
                right,
            }));
        }
        Ok(left)
    }

    fn peek_binary(
        &self,
        g: &Goal<'b, 'src>,
        ctx: Context,
    ) -> Option<(BinaryOperator, Tier, Option<GtOperator>)> {
        let kind = g.peek_kind();
        if kind == TokenKind::GreaterThanToken {
            let op = g.peek_gt()?;
            let (operator, tier) = op.binary()?;
            return Some((operator, tier, Some(op)));
        }
        if kind == TokenKind::InKeyword && !ctx.contains(Context::IN) {
            return None;
        }
        let (operator, tier) = binary_operator(kind)?;
        Some((operator, tier, None))
    }

    /// An operand of a binary operator: `#x in obj`, or an exponentiation.
    fn parse_binary_operand(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        min: Tier,
    ) -> Step<Expression<'src>> {
        if g.at(TokenKind::PrivateName)
            && g.peek_nth_kind(1) == TokenKind::InKeyword
            && ctx.contains(Context::IN)
            && min <= Tier::Relational
        {
            let start = g.end();
            let name = self.parse_private_name(g)?;
            g.skip();
            let right = self.parse_binary(g, ctx, Tier::Shift)?;
            return Ok(Expression::PrivateIn(Box::new(PrivateInExpression {
                span: g.since(start),
                name,
                right,
            })));
        }
        self.parse_exponent(g, ctx)
    }

    /// `a ** b ** c`, right-associative. A bare unary or `await` operand on
    /// the left of `**` is a syntax error.
    fn parse_exponent(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let first = self.parse_unary(g, ctx)?;
        let mut rest = Vec::new();
        let mut previous_unary = is_unary_like(&first);
        while g.at(TokenKind::AsteriskAsteriskToken) {
            if previous_unary {
                return Err(g.expected("parentheses around the unary operand of `**`"));
            }
            g.skip();
            let operand = self.parse_unary(g, ctx)?;
            previous_unary = is_unary_like(&operand);
            rest.push(operand);
        }
        let Some(mut right) = rest.pop() else {
            return Ok(first);
        };
        while let Some(left) = rest.pop() {
            right = binary(left, BinaryOperator::Exponential, right);
        }
        Ok(binary(first, BinaryOperator::Exponential, right))
    }

    // ========================================================================
    // Unary and update
    // ========================================================================

    fn parse_unary(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let operator = unary_operator(g.peek_kind());
        let is_await = operator.is_none() && ctx.contains(Context::AWAIT) && g.at_word("await");
        if operator.is_none() && !is_await {
            return self.parse_update(g, ctx);
        }
        let expr = self.nested(g, "UnaryExpression", |p, g| {
            g.skip();
            let argument = p.parse_unary(g, ctx)?;
            let span = g.span();
            Ok(match operator {
                Some(operator) => Expression::Unary(Box::new(UnaryExpression {
                    span,
                    operator,
                    argument,
                })),
                None => Expression::Await(Box::new(AwaitExpression { span, argument })),
            })
        })?;
        Ok(expr)
    }

    fn parse_update(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let start = g.end();
        if let Some(operator) = update_operator(g.peek_kind()) {
            g.skip();
            let operand = self.parse_unary(g, ctx)?;
            let argument = SimpleAssignmentTarget::try_from(operand).map_err(|err| g.conversion(err))?;
            return Ok(Expression::Update(Box::new(UpdateExpression {
                span: g.since(start),
                operator,
                prefix: true,
                argument,
            })));
        }

        let expr = self.parse_lhs(g, ctx)?;
        if g.line_terminator_ahead() {
            return Ok(expr);
        }
        let Some(operator) = update_operator(g.peek_kind()) else {
            return Ok(expr);
        };
        let argument = SimpleAssignmentTarget::try_from(expr).map_err(|err| g.conversion(err))?;
        g.skip();
        Ok(Expression::Update(Box::new(UpdateExpression {
            span: g.since(start),
            operator,
            prefix: false,
            argument,
        })))
    }

    // ========================================================================
    // Left-hand-side expressions
    // ========================================================================

    /// `LeftHandSideExpression`: member, call, `new`, and optional chains.
    pub(crate) fn parse_lhs(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let start = g.end();
        let expr = self.parse_member_head(g, ctx)?;
        self.parse_suffixes(g, ctx, start, expr, true)
    }

    fn parse_member_head(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        match g.peek_kind() {
            TokenKind::NewKeyword => Ok(self.parse_new(g, ctx)?),
            TokenKind::SuperKeyword => {
                let start = g.end();
                g.skip();
                if !matches!(
                    g.peek_kind(),
                    TokenKind::OpenParenToken | TokenKind::DotToken | TokenKind::OpenBracketToken
                ) {
                    return Err(g.expected("`super` call or property access"));
                }
                Ok(Expression::Super(g.since(start)))
            }
            TokenKind::ImportKeyword => self.parse_import_expression(g, ctx),
            _ => self.parse_primary(g, ctx),
        }
    }

    fn parse_new(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Expression<'src>> {
        self.nested(parent, "NewExpression", |p, g| {
            let token = g.skip();
            let meta = Identifier {
                span: g.span(),
                name: token.raw,
            };
            if g.accept(TokenKind::DotToken) {
                if !g.at_word("target") {
                    return Err(g.expected("`target`"));
                }
                let property = p.parse_identifier_name(g)?;
                return Ok(Expression::MetaProperty(Box::new(MetaProperty {
                    span: g.span(),
                    meta,
                    property,
                })));
            }

            let callee_start = g.end();
            let callee = p.parse_member_head(g, ctx)?;
            let callee = p.parse_suffixes(g, ctx, callee_start, callee, false)?;
            p.ts_call_type_arguments(g)?;
            let arguments = if g.at(TokenKind::OpenParenToken) {
                Some(p.parse_arguments(g, ctx)?)
            } else {
                None
            };
            Ok(Expression::New(Box::new(NewExpression {
                span: g.span(),
                callee,
                arguments,
            })))
        })
    }

    /// `import.meta` or `import(source [, options])`.
    fn parse_import_expression(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<Expression<'src>> {
        let start = g.end();
        let token = g.skip();
        if g.accept(TokenKind::DotToken) {
            let meta = Identifier {
                span: g.since(start),
                name: token.raw,
            };
            if !g.at_word("meta") {
                return Err(g.expected("`meta`"));
            }
            let property = self.parse_identifier_name(g)?;
            return Ok(Expression::MetaProperty(Box::new(MetaProperty {
                span: g.since(start),
                meta,
                property,
            })));
        }
        if !g.accept(TokenKind::OpenParenToken) {
            return Err(g.expected("`import.meta` or `import(`"));
        }
        let source = self.parse_assignment(g, ctx.with_in())?;
        let mut options = None;
        if g.accept(TokenKind::CommaToken) && !g.at(TokenKind::CloseParenToken) {
            options = Some(self.parse_assignment(g, ctx.with_in())?);
            g.accept(TokenKind::CommaToken);
        }
        g.expect(TokenKind::CloseParenToken)?;
        Ok(Expression::ImportCall(Box::new(ImportCall {
            span: g.since(start),
            source,
            options,
        })))
    }

    /// Member accesses, calls, tagged templates and optional chains after
    /// `expr`. With `calls` off (a `new` callee) only member accesses and
    /// templates are taken.
    fn parse_suffixes(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        start: u32,
        mut expr: Expression<'src>,
        calls: bool,
    ) -> Step<Expression<'src>> {
        let mut chained = false;
        loop {
            match g.peek_kind() {
                TokenKind::DotToken => {
                    g.skip();
                    let property = self.parse_member_property(g)?;
                    expr = member(g.since(start), expr, property, false);
                }
                TokenKind::OpenBracketToken => {
                    g.skip();
                    let property = self.parse_expression(g, ctx.with_in())?;
                    g.expect(TokenKind::CloseBracketToken)?;
                    expr = member(g.since(start), expr, MemberProperty::Computed(property), false);
                }
                TokenKind::QuestionDotToken if calls => {
                    g.skip();
                    chained = true;
                    match g.peek_kind() {
                        TokenKind::OpenParenToken | TokenKind::LessThanToken => {
                            self.ts_call_type_arguments(g)?;
                            let arguments = self.parse_arguments(g, ctx)?;
                            expr = call(g.since(start), expr, arguments, true);
                        }
                        TokenKind::OpenBracketToken => {
                            g.skip();
                            let property = self.parse_expression(g, ctx.with_in())?;
                            g.expect(TokenKind::CloseBracketToken)?;
                            expr = member(g.since(start), expr, MemberProperty::Computed(property), true);
                        }
                        _ => {
                            let property = self.parse_member_property(g)?;
                            expr = member(g.since(start), expr, property, true);
                        }
                    }
                }
                TokenKind::QuestionDotToken => {
                    return Err(g.expected("arguments before an optional chain"));
                }
                TokenKind::OpenParenToken if calls => {
                    let arguments = self.parse_arguments(g, ctx)?;
                    expr = call(g.since(start), expr, arguments, false);
                }
                TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => {
                    if chained {
                        return Err(g.expected("no tagged template in an optional chain"));
                    }
                    let quasi = self.parse_template(g, ctx)?;
                    expr = Expression::TaggedTemplate(Box::new(TaggedTemplate {
                        span: g.since(start),
                        tag: expr,
                        quasi,
                    }));
                }
                TokenKind::ExclamationToken if self.typescript() && !g.line_terminator_ahead() => {
                    g.skip();
                }
                TokenKind::LessThanToken if self.typescript() => {
                    if !self.ts_call_type_arguments(g)? {
                        break;
                    }
                }
                _ => break,
            }
        }
        if chained {
            expr = Expression::Chain(Box::new(ChainExpression {
                span: g.since(start),
                expression: expr,
            }));
        }
        Ok(expr)
    }

    fn parse_member_property(&mut self, g: &mut Goal<'b, 'src>) -> Step<MemberProperty<'src>> {
        if g.at(TokenKind::PrivateName) {
            return Ok(MemberProperty::Private(self.parse_private_name(g)?));
        }
        if !g.peek_kind().is_identifier_name() {
            return Err(g.expected("property name"));
        }
        Ok(MemberProperty::Identifier(self.parse_identifier_name(g)?))
    }

    pub(crate) fn parse_arguments(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Vec<Argument<'src>>> {
        self.production(parent, "Arguments", |p, g| {
            g.expect(TokenKind::OpenParenToken)?;
            let mut arguments = Vec::new();
            while !g.at(TokenKind::CloseParenToken) {
                let start = g.end();
                if g.accept(TokenKind::DotDotDotToken) {
                    let argument = p.parse_assignment(g, ctx.with_in())?;
                    arguments.push(Argument::Spread(SpreadElement {
                        span: g.since(start),
                        argument,
                    }));
                } else {
                    arguments.push(Argument::Expression(p.parse_assignment(g, ctx.with_in())?));
                }
                if !g.accept(TokenKind::CommaToken) {
                    break;
                }
            }
            g.expect(TokenKind::CloseParenToken)?;
            Ok(arguments)
        })
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Expression<'src>> {
        let token = g.peek();
        match token.kind {
            TokenKind::ThisKeyword => {
                let start = g.end();
                g.skip();
                Ok(Expression::This(g.since(start)))
            }
            TokenKind::Identifier => {
                if token.raw == "async"
                    && g.peek_nth_kind(1) == TokenKind::FunctionKeyword
                    && !g.line_terminator_after_nth(0)
                {
                    let function = self.parse_function_expression(g, ctx)?;
                    return Ok(Expression::Function(Box::new(function)));
                }
                Ok(Expression::Identifier(self.parse_identifier(g, ctx)?))
            }
            TokenKind::NullKeyword
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword
            | TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::StringLiteral
            | TokenKind::RegularExpressionLiteral => Ok(Expression::Literal(self.parse_literal(g)?)),
            TokenKind::OpenBracketToken => Ok(self.parse_array_literal(g, ctx)?),
            TokenKind::OpenBraceToken => Ok(self.parse_object_literal(g, ctx)?),
            TokenKind::FunctionKeyword => {
                let function = self.parse_function_expression(g, ctx)?;
                Ok(Expression::Function(Box::new(function)))
            }
            TokenKind::ClassKeyword => {
                let class = self.parse_class_expression(g, ctx)?;
                Ok(Expression::Class(Box::new(class)))
            }
            TokenKind::AtToken if self.typescript() => {
                let class = self.parse_class_expression(g, ctx)?;
                Ok(Expression::Class(Box::new(class)))
            }
            TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => {
                Ok(Expression::Template(Box::new(self.parse_template(g, ctx)?)))
            }
            TokenKind::OpenParenToken => Ok(self.parse_parenthesized(g, ctx)?),
            _ => Err(g.expected("expression")),
        }
    }

    pub(crate) fn parse_template(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<TemplateLiteral<'src>> {
        let start = g.end();
        let head = match g.peek_kind() {
            TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => g.skip(),
            _ => return Err(g.expected("template literal")),
        };
        let tail = head.kind == TokenKind::NoSubstitutionTemplate;
        let mut quasis = vec![TemplateElement {
            span: g.since(start),
            raw: head.raw,
            tail,
        }];
        let mut expressions = Vec::new();
        if !tail {
            loop {
                expressions.push(self.parse_expression(g, ctx.with_in())?);
                let piece_start = g.end();
                let tail = match g.peek_kind() {
                    TokenKind::TemplateMiddle => false,
                    TokenKind::TemplateTail => true,
                    _ => return Err(g.expected("`}` closing the template substitution")),
                };
                let piece = g.skip();
                quasis.push(TemplateElement {
                    span: g.since(piece_start),
                    raw: piece.raw,
                    tail,
                });
                if tail {
                    break;
                }
            }
        }
        Ok(TemplateLiteral {
            span: g.since(start),
            quasis,
            expressions,
        })
    }

    fn parse_array_literal(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Expression<'src>> {
        self.production(parent, "ArrayLiteral", |p, g| {
            g.expect(TokenKind::OpenBracketToken)?;
            let mut elements = Vec::new();
            let mut trailing_comma = false;
            loop {
                if g.at(TokenKind::CloseBracketToken) {
                    break;
                }
                if g.accept(TokenKind::CommaToken) {
                    elements.push(ArrayElement::Hole);
                    trailing_comma = false;
                    continue;
                }
                let start = g.end();
                let element = if g.accept(TokenKind::DotDotDotToken) {
                    let argument = p.parse_assignment(g, ctx.with_in())?;
                    ArrayElement::Spread(SpreadElement {
                        span: g.since(start),
                        argument,
                    })
                } else {
                    ArrayElement::Expression(p.parse_assignment(g, ctx.with_in())?)
                };
                elements.push(element);
                if g.at(TokenKind::CloseBracketToken) {
                    trailing_comma = false;
                    break;
                }
                g.expect(TokenKind::CommaToken)?;
                trailing_comma = true;
            }
            g.expect(TokenKind::CloseBracketToken)?;
            Ok(Expression::Array(Box::new(ArrayLiteral {
                span: g.span(),
                elements,
                trailing_comma,
            })))
        })
    }

    fn parse_object_literal(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Expression<'src>> {
        self.production(parent, "ObjectLiteral", |p, g| {
            g.expect(TokenKind::OpenBraceToken)?;
            let mut properties = Vec::new();
            while !g.at(TokenKind::CloseBraceToken) {
                properties.push(p.parse_property_definition(g, ctx)?);
                if !g.accept(TokenKind::CommaToken) {
                    break;
                }
            }
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(Expression::Object(Box::new(ObjectLiteral {
                span: g.span(),
                properties,
            })))
        })
    }

    fn parse_property_definition(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<PropertyDefinition<'src>> {
        let start = g.end();
        if g.accept(TokenKind::DotDotDotToken) {
            let argument = self.parse_assignment(g, ctx.with_in())?;
            return Ok(PropertyDefinition::Spread(SpreadElement {
                span: g.since(start),
                argument,
            }));
        }

        let mut is_async = false;
        let mut is_generator = false;
        let mut kind = MethodKind::Method;
        let next = g.peek_nth_kind(1);
        if g.at_word("async")
            && !g.line_terminator_after_nth(0)
            && (starts_property_name(next) || next == TokenKind::AsteriskToken)
        {
            g.skip();
            is_async = true;
        }
        if g.accept(TokenKind::AsteriskToken) {
            is_generator = true;
        } else if !is_async
            && (g.at_word("get") || g.at_word("set"))
            && starts_property_name(g.peek_nth_kind(1))
        {
            kind = if g.at_word("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            g.skip();
        }

        let key_kind = g.peek_kind();
        let key = self.parse_property_key(g, ctx, false)?;
        let is_method = is_async
            || is_generator
            || kind != MethodKind::Method
            || g.at(TokenKind::OpenParenToken)
            || (self.typescript() && g.at(TokenKind::LessThanToken));
        if is_method {
            let Some(value) = self.parse_method_function(g, is_async, is_generator, false)? else {
                return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::OpenBraceToken)));
            };
            return Ok(PropertyDefinition::Method(Box::new(MethodDefinition {
                span: g.since(start),
                key,
                kind,
                is_static: false,
                value,
            })));
        }

        if g.accept(TokenKind::ColonToken) {
            let value = self.parse_assignment(g, ctx.with_in())?;
            return Ok(PropertyDefinition::KeyValue(Box::new(KeyValueProperty {
                span: g.since(start),
                key,
                value,
            })));
        }

        let name = match key {
            PropertyKey::Identifier(id) if key_kind == TokenKind::Identifier && !ctx.reserves(id.name) => id,
            _ => return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::ColonToken))),
        };
        if g.accept(TokenKind::EqualsToken) {
            let initializer = self.parse_assignment(g, ctx.with_in())?;
            return Ok(PropertyDefinition::CoverInitializedName(Box::new(
                CoverInitializedName {
                    span: g.since(start),
                    name,
                    initializer,
                },
            )));
        }
        Ok(PropertyDefinition::Shorthand(name))
    }

    /// A property name in an object literal, class body, or object pattern.
    /// Private names are only allowed in class bodies.
    pub(crate) fn parse_property_key(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        allow_private: bool,
    ) -> Step<PropertyKey<'src>> {
        let start = g.end();
        match g.peek_kind() {
            TokenKind::StringLiteral => Ok(PropertyKey::String(self.parse_literal(g)?)),
            TokenKind::NumericLiteral | TokenKind::BigIntLiteral => {
                Ok(PropertyKey::Numeric(self.parse_literal(g)?))
            }
            TokenKind::OpenBracketToken => {
                g.skip();
                let expression = self.parse_assignment(g, ctx.with_in())?;
                g.expect(TokenKind::CloseBracketToken)?;
                Ok(PropertyKey::Computed(Box::new(ComputedKey {
                    span: g.since(start),
                    expression,
                })))
            }
            TokenKind::PrivateName if allow_private => {
                Ok(PropertyKey::Private(self.parse_private_name(g)?))
            }
            kind if kind.is_identifier_name() => {
                Ok(PropertyKey::Identifier(self.parse_identifier_name(g)?))
            }
            _ => Err(g.expected("property name")),
        }
    }
}

fn member<'src>(
    span: TokenSpan,
    object: Expression<'src>,
    property: MemberProperty<'src>,
    optional: bool,
) -> Expression<'src> {
    Expression::Member(Box::new(MemberExpression {
        span,
        object,
        property,
        optional,
    }))
}

fn call<'src>(
    span: TokenSpan,
    callee: Expression<'src>,
    arguments: Vec<Argument<'src>>,
    optional: bool,
) -> Expression<'src> {
    Expression::Call(Box::new(CallExpression {
        span,
        callee,
        arguments,
        optional,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;

    fn expr(source: &str) -> Expression<'_> {
        expr_with(source, ParseOptions::default())
    }

    fn expr_with(source: &str, options: ParseOptions) -> Expression<'_> {
        let program = crate::parse(source, &options).unwrap();
        match program.body.into_iter().next() {
            Some(Statement::Expression(stmt)) => stmt.expression,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    fn binary_parts<'a, 'src>(
        e: &'a Expression<'src>,
    ) -> (&'a Expression<'src>, BinaryOperator, &'a Expression<'src>) {
        match e {
            Expression::Binary(b) => (&b.left, b.operator, &b.right),
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_and_associativity() {
        let e = expr("a + b * c - d;");
        let (left, op, right) = binary_parts(&e);
        assert_eq!(op, BinaryOperator::Subtraction);
        assert!(matches!(right, Expression::Identifier(id) if id.name == "d"));
        let (_, inner, product) = binary_parts(left);
        assert_eq!(inner, BinaryOperator::Addition);
        assert_eq!(binary_parts(product).1, BinaryOperator::Multiplication);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let e = expr("a ** b ** c;");
        let (left, op, right) = binary_parts(&e);
        assert_eq!(op, BinaryOperator::Exponential);
        assert!(matches!(left, Expression::Identifier(_)));
        assert_eq!(binary_parts(right).1, BinaryOperator::Exponential);
    }

    #[test]
    fn test_unary_operand_of_exponent_is_rejected() {
        assert!(crate::parse_script("-a ** 2;").is_err());
        assert!(crate::parse_script("(-a) ** 2;").is_ok());
        assert!(crate::parse_script("a ** -b;").is_ok());
    }

    #[test]
    fn test_shift_operators_recombine() {
        let e = expr("a >>> b >> c;");
        let (left, op, _) = binary_parts(&e);
        assert_eq!(op, BinaryOperator::ShiftRight);
        assert_eq!(binary_parts(left).1, BinaryOperator::ShiftRightZeroFill);

        match expr("a >>>= 1;") {
            Expression::Assignment(a) => assert_eq!(a.operator, AssignmentOperator::ShiftRightZeroFill),
            other => panic!("expected assignment, got {:?}", other),
        }
        assert_eq!(binary_parts(&expr("a >= b;")).1, BinaryOperator::GreaterEqualThan);
    }

    #[test]
    fn test_coalesce_mixing() {
        assert!(crate::parse_script("a ?? b || c;").is_err());
        assert!(crate::parse_script("a || b ?? c;").is_err());
        assert!(crate::parse_script("a ?? (b || c);").is_ok());
        assert!(crate::parse_script("a ?? b ?? c;").is_ok());
    }

    #[test]
    fn test_conditional_and_assignment() {
        match expr("x = a ? b : c;") {
            Expression::Assignment(a) => {
                assert!(matches!(a.target, AssignmentTarget::Simple(SimpleAssignmentTarget::Identifier(_))));
                assert!(matches!(a.value, Expression::Conditional(_)));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
        assert!(crate::parse_script("a + b = c;").is_err());
        assert!(crate::parse_script("[a, b] += c;").is_err());
        assert!(crate::parse_script("[a, b] = c;").is_ok());
    }

    #[test]
    fn test_arrow_functions() {
        match expr("(a, {b = 1}) => a;") {
            Expression::Arrow(arrow) => {
                assert_eq!(arrow.params.items.len(), 2);
                assert!(matches!(arrow.body, ArrowBody::Expression(_)));
            }
            other => panic!("expected arrow, got {:?}", other),
        }
        match expr("async x => await x;") {
            Expression::Arrow(arrow) => assert!(arrow.is_async),
            other => panic!("expected arrow, got {:?}", other),
        }
        assert!(matches!(expr("(...rest) => rest;"), Expression::Arrow(_)));
        assert!(matches!(expr("() => {};"), Expression::Arrow(_)));
        match expr("(a, {b = 1});") {
            Expression::Parenthesized(p) => assert!(matches!(p.expression, Expression::Sequence(_))),
            other => panic!("expected parenthesized, got {:?}", other),
        }
        assert!(crate::parse_script("(a)\n=> a;").is_err());
    }

    #[test]
    fn test_async_call_is_not_an_arrow() {
        match expr("async(a, b);") {
            Expression::Call(c) => assert_eq!(c.arguments.len(), 2),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_chain() {
        match expr("a?.b.c();") {
            Expression::Chain(chain) => match &chain.expression {
                Expression::Call(c) => assert!(!c.optional),
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected chain, got {:?}", other),
        }
        assert!(crate::parse_script("a?.b`t`;").is_err());
        assert!(crate::parse_script("a?.b = 1;").is_err());
    }

    #[test]
    fn test_new_and_meta_properties() {
        match expr("new a.B(1);") {
            Expression::New(n) => {
                assert!(matches!(n.callee, Expression::Member(_)));
                assert_eq!(n.arguments.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("expected new, got {:?}", other),
        }
        match expr("new X;") {
            Expression::New(n) => assert!(n.arguments.is_none()),
            other => panic!("expected new, got {:?}", other),
        }
        let module = ParseOptions::default().module();
        assert!(matches!(expr_with("import.meta;", module), Expression::MetaProperty(_)));
        assert!(matches!(expr("import('m');"), Expression::ImportCall(_)));
    }

    #[test]
    fn test_object_literal_forms() {
        match expr("({ a, b: 1, [c]: 2, get d() {}, async *e() {}, ...f, 'g': 3, 4: 5 });") {
            Expression::Parenthesized(p) => match &p.expression {
                Expression::Object(o) => {
                    assert_eq!(o.properties.len(), 8);
                    assert!(matches!(o.properties[0], PropertyDefinition::Shorthand(_)));
                    match &o.properties[3] {
                        PropertyDefinition::Method(m) => assert_eq!(m.kind, MethodKind::Get),
                        other => panic!("expected getter, got {:?}", other),
                    }
                    match &o.properties[4] {
                        PropertyDefinition::Method(m) => {
                            assert!(m.value.is_async && m.value.is_generator)
                        }
                        other => panic!("expected method, got {:?}", other),
                    }
                }
                other => panic!("expected object, got {:?}", other),
            },
            other => panic!("expected parenthesized, got {:?}", other),
        }
    }

    #[test]
    fn test_cover_initialized_name() {
        assert!(crate::parse_script("({ a = 1 } = b);").is_ok());
        assert!(crate::parse_script("({ a = 1 });").is_ok());
        assert!(crate::parse_script("({ if });").is_err());
    }

    #[test]
    fn test_array_holes_and_trailing_comma() {
        match expr("[a, , b,];") {
            Expression::Array(a) => {
                assert_eq!(a.elements.len(), 3);
                assert!(matches!(a.elements[1], ArrayElement::Hole));
                assert!(a.trailing_comma);
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_templates() {
        match expr("tag`a${b}c${d}e`;") {
            Expression::TaggedTemplate(t) => {
                assert_eq!(t.quasi.quasis.len(), 3);
                assert_eq!(t.quasi.expressions.len(), 2);
                assert_eq!(t.quasi.quasis[1].text(), "c");
                assert!(t.quasi.quasis[2].tail);
            }
            other => panic!("expected tagged template, got {:?}", other),
        }
    }

    #[test]
    fn test_yield_and_await_are_contextual() {
        assert!(crate::parse_script("function* g() { yield; yield* x; yield a, b; }").is_ok());
        assert!(crate::parse_script("var yield = 1;").is_ok());
        assert!(crate::parse_script("async function f() { await x; }").is_ok());
        assert!(crate::parse_script("await(1);").is_ok());
        assert!(crate::parse_module("await x;").is_ok());
    }

    #[test]
    fn test_private_in() {
        let src = "class A { #x; has(o) { return #x in o; } }";
        assert!(crate::parse_script(src).is_ok());
    }

    #[test]
    fn test_in_is_excluded_from_for_init() {
        assert!(crate::parse_script("for (var i = 0 in x;;) {}").is_err());
        assert!(crate::parse_script("for (var i = (0 in x);;) {}").is_ok());
    }

    #[test]
    fn test_update_targets() {
        assert!(crate::parse_script("a++; --b.c;").is_ok());
        assert!(crate::parse_script("++a();").is_err());
        // A line terminator before `++` ends the statement.
        let program = crate::parse_script("a\n++b").unwrap();
        assert_eq!(program.body.len(), 2);
    }
}
