//! Statements, declarations and statement lists.

use crate::context::Context;
use crate::cursor::Goal;
use crate::parser::{Fail, PResult, Parser, Step};
use rsecma_ast::*;
use rsecma_diagnostics::ErrorCause;

/// The parenthesized part of a `for` statement.
enum ForHeadParts<'src> {
    In {
        left: ForHead<'src>,
        right: Expression<'src>,
    },
    Of {
        left: ForHead<'src>,
        right: Expression<'src>,
    },
    Loop {
        init: Option<ForInit<'src>>,
        test: Option<Expression<'src>>,
        update: Option<Expression<'src>>,
    },
}

/// The declaration keyword ahead, if the next tokens start a declaration
/// inside a `for` head.
fn variable_kind_ahead(g: &Goal<'_, '_>) -> Option<VariableKind> {
    match g.peek_kind() {
        TokenKind::VarKeyword => Some(VariableKind::Var),
        TokenKind::ConstKeyword => Some(VariableKind::Const),
        TokenKind::Identifier
            if g.at_word("let")
                && matches!(
                    g.peek_nth_kind(1),
                    TokenKind::Identifier | TokenKind::OpenBracketToken | TokenKind::OpenBraceToken
                ) =>
        {
            Some(VariableKind::Let)
        }
        _ => None,
    }
}

impl<'b, 'src> Parser<'b, 'src> {
    // ========================================================================
    // Statement lists
    // ========================================================================

    /// Items up to (not including) `close` or end of input. `module` enables
    /// `import` and `export` declarations.
    pub(crate) fn parse_items(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        module: bool,
        close: TokenKind,
    ) -> Step<Vec<Statement<'src>>> {
        let mut items = Vec::new();
        while !g.at(close) && !g.at_end() {
            items.push(self.parse_item(g, ctx, module)?);
        }
        Ok(items)
    }

    /// `StatementListItem`: a statement or a declaration.
    pub(crate) fn parse_item(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
        module: bool,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "StatementListItem", |p, g| {
            let ts = p.typescript();
            let token = g.peek();
            match token.kind {
                TokenKind::FunctionKeyword => return Ok(p.parse_function_declaration(g, ctx)?),
                TokenKind::ClassKeyword => {
                    return Ok(Statement::Class(Box::new(p.parse_class_declaration(g, ctx)?)))
                }
                TokenKind::ConstKeyword if ts && g.peek_nth_kind(1) == TokenKind::EnumKeyword => {
                    return Ok(p.ts_declaration(g, ctx)?)
                }
                TokenKind::ConstKeyword => return Ok(p.parse_lexical_declaration(g, ctx)?),
                TokenKind::ImportKeyword
                    if module
                        && !matches!(
                            g.peek_nth_kind(1),
                            TokenKind::OpenParenToken | TokenKind::DotToken
                        ) =>
                {
                    return Ok(p.parse_import_declaration(g, ctx)?)
                }
                TokenKind::ExportKeyword if module => return Ok(p.parse_export_declaration(g, ctx)?),
                TokenKind::AtToken if ts => {
                    p.ts_decorators(g, ctx)?;
                    if module && g.at(TokenKind::ExportKeyword) {
                        return Ok(p.parse_export_declaration(g, ctx)?);
                    }
                    return Ok(Statement::Class(Box::new(p.parse_class_declaration(g, ctx)?)));
                }
                TokenKind::Identifier
                    if token.raw == "async"
                        && g.peek_nth_kind(1) == TokenKind::FunctionKeyword
                        && !g.line_terminator_after_nth(0) =>
                {
                    return Ok(p.parse_function_declaration(g, ctx)?)
                }
                _ => {}
            }

            // `let` and the TypeScript declaration words are also ordinary
            // identifiers: try the declaration, then the statement. No
            // expression statement starts with `let [`.
            let let_bracket =
                token.is_word("let") && g.peek_nth_kind(1) == TokenKind::OpenBracketToken;
            let declaration = if token.is_word("let") {
                Some(p.parse_lexical_declaration(g, ctx))
            } else if p.ts_declaration_ahead(g) {
                Some(p.ts_declaration(g, ctx))
            } else {
                None
            };
            match declaration {
                None => Ok(p.parse_statement(g, ctx)?),
                Some(Ok(stmt)) => Ok(stmt),
                Some(Err(err)) if err.is_fatal() || let_bracket => Err(err.into()),
                Some(Err(err)) => match p.parse_statement(g, ctx) {
                    Ok(stmt) => Ok(stmt),
                    Err(other) => Err(Fail::Nested(err).furthest(Fail::Nested(other))),
                },
            }
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn parse_statement(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.nested(parent, "Statement", |p, g| {
            let token = g.peek();
            let stmt = match token.kind {
                TokenKind::OpenBraceToken => Statement::Block(p.parse_block(g, ctx)?),
                TokenKind::SemicolonToken => {
                    g.skip();
                    Statement::Empty(g.span())
                }
                TokenKind::VarKeyword => p.parse_variable_statement(g, ctx)?,
                TokenKind::IfKeyword => p.parse_if(g, ctx)?,
                TokenKind::DoKeyword => p.parse_do_while(g, ctx)?,
                TokenKind::WhileKeyword => p.parse_while(g, ctx)?,
                TokenKind::ForKeyword => p.parse_for(g, ctx)?,
                TokenKind::ContinueKeyword => p.parse_continue(g, ctx)?,
                TokenKind::BreakKeyword => p.parse_break(g, ctx)?,
                TokenKind::ReturnKeyword => p.parse_return(g, ctx)?,
                TokenKind::WithKeyword => p.parse_with(g, ctx)?,
                TokenKind::SwitchKeyword => p.parse_switch(g, ctx)?,
                TokenKind::ThrowKeyword => p.parse_throw(g, ctx)?,
                TokenKind::TryKeyword => p.parse_try(g, ctx)?,
                TokenKind::DebuggerKeyword => {
                    g.skip();
                    g.expect_semicolon()?;
                    Statement::Debugger(g.span())
                }
                TokenKind::FunctionKeyword => p.parse_function_declaration(g, ctx)?,
                TokenKind::Identifier
                    if g.peek_nth_kind(1) == TokenKind::ColonToken && !ctx.reserves(token.raw) =>
                {
                    p.parse_labeled(g, ctx)?
                }
                _ => p.parse_expression_statement(g, ctx)?,
            };
            Ok(stmt)
        })
    }

    pub(crate) fn parse_block(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<BlockStatement<'src>> {
        self.production(parent, "BlockStatement", |p, g| {
            g.expect(TokenKind::OpenBraceToken)?;
            let body = p.parse_items(g, ctx, false, TokenKind::CloseBraceToken)?;
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(BlockStatement {
                span: g.span(),
                body,
            })
        })
    }

    fn parse_expression_statement(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "ExpressionStatement", |p, g| {
            if g.at(TokenKind::ClassKeyword) {
                return Err(g.expected("statement"));
            }
            let expression = p.parse_expression(g, ctx.with_in())?;
            g.expect_semicolon()?;
            Ok(Statement::Expression(ExpressionStatement {
                span: g.span(),
                expression,
            }))
        })
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub(crate) fn parse_variable_statement(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "VariableStatement", |p, g| {
            g.expect(TokenKind::VarKeyword)?;
            let declarations = p.parse_declarations(g, ctx.with_in(), VariableKind::Var)?;
            g.expect_semicolon()?;
            Ok(Statement::Variable(VariableDeclaration {
                span: g.span(),
                kind: VariableKind::Var,
                declarations,
            }))
        })
    }

    /// `let` or `const` declarations.
    pub(crate) fn parse_lexical_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "LexicalDeclaration", |p, g| {
            let kind = if g.accept(TokenKind::ConstKeyword) {
                VariableKind::Const
            } else {
                g.expect_word("let")?;
                VariableKind::Let
            };
            let declarations = p.parse_declarations(g, ctx.with_in(), kind)?;
            g.expect_semicolon()?;
            Ok(Statement::Variable(VariableDeclaration {
                span: g.span(),
                kind,
                declarations,
            }))
        })
    }

    fn parse_declarations(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        kind: VariableKind,
    ) -> Step<Vec<VariableDeclarator<'src>>> {
        let mut declarations = vec![self.parse_declarator(g, ctx, kind, false)?];
        while g.accept(TokenKind::CommaToken) {
            declarations.push(self.parse_declarator(g, ctx, kind, false)?);
        }
        Ok(declarations)
    }

    /// One `pattern [= init]`. In a `for-in`/`for-of` head the initializer
    /// is absent and never required.
    fn parse_declarator(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
        kind: VariableKind,
        in_for_head: bool,
    ) -> PResult<VariableDeclarator<'src>> {
        self.production(parent, "VariableDeclarator", |p, g| {
            let ts = p.typescript();
            let id = p.parse_binding_pattern(g, ctx)?;
            if ts {
                g.accept(TokenKind::ExclamationToken);
                p.ts_type_annotation(g)?;
            }
            let init = if !in_for_head && g.accept(TokenKind::EqualsToken) {
                Some(p.parse_assignment(g, ctx)?)
            } else {
                None
            };
            if init.is_none() && !in_for_head {
                let is_pattern = !matches!(id, BindingPattern::Identifier(_));
                let bare_const = kind == VariableKind::Const && !ts;
                if is_pattern || bare_const {
                    return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::EqualsToken)));
                }
            }
            Ok(VariableDeclarator {
                span: g.span(),
                id,
                init,
            })
        })
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_if(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "IfStatement", |p, g| {
            g.expect(TokenKind::IfKeyword)?;
            g.expect(TokenKind::OpenParenToken)?;
            let test = p.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            let consequent = p.parse_statement(g, ctx)?;
            let alternate = if g.accept(TokenKind::ElseKeyword) {
                Some(p.parse_statement(g, ctx)?)
            } else {
                None
            };
            Ok(Statement::If(Box::new(IfStatement {
                span: g.span(),
                test,
                consequent,
                alternate,
            })))
        })
    }

    fn parse_do_while(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "DoWhileStatement", |p, g| {
            g.expect(TokenKind::DoKeyword)?;
            let body = p.parse_statement(g, ctx)?;
            g.expect(TokenKind::WhileKeyword)?;
            g.expect(TokenKind::OpenParenToken)?;
            let test = p.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            // A `;` is inserted after `do … while (…)` even on the same line.
            g.accept(TokenKind::SemicolonToken);
            Ok(Statement::DoWhile(Box::new(DoWhileStatement {
                span: g.span(),
                body,
                test,
            })))
        })
    }

    fn parse_while(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "WhileStatement", |p, g| {
            g.expect(TokenKind::WhileKeyword)?;
            g.expect(TokenKind::OpenParenToken)?;
            let test = p.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            let body = p.parse_statement(g, ctx)?;
            Ok(Statement::While(Box::new(WhileStatement {
                span: g.span(),
                test,
                body,
            })))
        })
    }

    /// `for (;;)`, `for (… in …)`, `for ([await] … of …)`. The in/of head is
    /// tried first; when it fails the three-part head gets a turn and the
    /// failure that got further is reported.
    fn parse_for(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "ForStatement", |p, g| {
            g.expect(TokenKind::ForKeyword)?;
            let is_await = ctx.contains(Context::AWAIT) && g.accept_word("await");
            g.expect(TokenKind::OpenParenToken)?;

            let in_of = p.production(g, "ForInOfHead", |p, g| p.parse_for_in_of_head(g, ctx, is_await));
            let head = match in_of {
                Ok(head) => head,
                Err(err) if err.is_fatal() || is_await => return Err(err.into()),
                Err(err) => match p.production(g, "ForLoopHead", |p, g| p.parse_for_loop_head(g, ctx)) {
                    Ok(head) => head,
                    Err(other) => return Err(Fail::Nested(err).furthest(Fail::Nested(other))),
                },
            };

            let body = p.parse_statement(g, ctx)?;
            let span = g.span();
            Ok(match head {
                ForHeadParts::In { left, right } => Statement::ForIn(Box::new(ForInStatement {
                    span,
                    left,
                    right,
                    body,
                })),
                ForHeadParts::Of { left, right } => Statement::ForOf(Box::new(ForOfStatement {
                    span,
                    is_await,
                    left,
                    right,
                    body,
                })),
                ForHeadParts::Loop { init, test, update } => Statement::For(Box::new(ForStatement {
                    span,
                    init,
                    test,
                    update,
                    body,
                })),
            })
        })
    }

    fn parse_for_in_of_head(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        is_await: bool,
    ) -> Step<ForHeadParts<'src>> {
        let left = match variable_kind_ahead(g) {
            Some(kind) => {
                let start = g.end();
                g.skip();
                let declarator = self.parse_declarator(g, ctx.without_in(), kind, true)?;
                ForHead::Variable(VariableDeclaration {
                    span: g.since(start),
                    kind,
                    declarations: vec![declarator],
                })
            }
            // `for (async of` only begins an arrow in the three-part head.
            None if !is_await && g.at_word("async") && g.peek_nth(1).is_word("of") => {
                return Err(g.expected("left-hand side other than `async`"));
            }
            None => {
                let target = self.parse_lhs(g, ctx.without_in())?;
                ForHead::Target(AssignmentTarget::try_from(target).map_err(|err| g.conversion(err))?)
            }
        };

        if g.accept_word("of") {
            let right = self.parse_assignment(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            return Ok(ForHeadParts::Of { left, right });
        }
        if !is_await && g.accept(TokenKind::InKeyword) {
            let right = self.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            return Ok(ForHeadParts::In { left, right });
        }
        Err(g.expected(if is_await { "`of`" } else { "`in` or `of`" }))
    }

    fn parse_for_loop_head(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<ForHeadParts<'src>> {
        let init = if g.at(TokenKind::SemicolonToken) {
            None
        } else if let Some(kind) = variable_kind_ahead(g) {
            let start = g.end();
            g.skip();
            let declarations = self.parse_declarations(g, ctx.without_in(), kind)?;
            Some(ForInit::Variable(VariableDeclaration {
                span: g.since(start),
                kind,
                declarations,
            }))
        } else {
            Some(ForInit::Expression(self.parse_expression(g, ctx.without_in())?))
        };
        g.expect(TokenKind::SemicolonToken)?;

        let test = if g.at(TokenKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression(g, ctx.with_in())?)
        };
        g.expect(TokenKind::SemicolonToken)?;

        let update = if g.at(TokenKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression(g, ctx.with_in())?)
        };
        g.expect(TokenKind::CloseParenToken)?;
        Ok(ForHeadParts::Loop { init, test, update })
    }

    /// The optional label of `break` / `continue`, on the same line.
    fn parse_jump_label(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Option<Identifier<'src>>> {
        if g.at(TokenKind::Identifier) && !g.line_terminator_ahead() {
            Ok(Some(self.parse_identifier(g, ctx)?))
        } else {
            Ok(None)
        }
    }

    fn parse_continue(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "ContinueStatement", |p, g| {
            g.expect(TokenKind::ContinueKeyword)?;
            let label = p.parse_jump_label(g, ctx)?;
            g.expect_semicolon()?;
            Ok(Statement::Continue(ContinueStatement {
                span: g.span(),
                label,
            }))
        })
    }

    fn parse_break(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "BreakStatement", |p, g| {
            g.expect(TokenKind::BreakKeyword)?;
            let label = p.parse_jump_label(g, ctx)?;
            g.expect_semicolon()?;
            Ok(Statement::Break(BreakStatement {
                span: g.span(),
                label,
            }))
        })
    }

    fn parse_return(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "ReturnStatement", |p, g| {
            if !ctx.contains(Context::RETURN) {
                return Err(g.expected("function body around `return`"));
            }
            g.expect(TokenKind::ReturnKeyword)?;
            let argument = if g.semicolon() {
                None
            } else {
                let argument = p.parse_expression(g, ctx.with_in())?;
                g.expect_semicolon()?;
                Some(argument)
            };
            Ok(Statement::Return(ReturnStatement {
                span: g.span(),
                argument,
            }))
        })
    }

    fn parse_with(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "WithStatement", |p, g| {
            g.expect(TokenKind::WithKeyword)?;
            g.expect(TokenKind::OpenParenToken)?;
            let object = p.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            let body = p.parse_statement(g, ctx)?;
            Ok(Statement::With(Box::new(WithStatement {
                span: g.span(),
                object,
                body,
            })))
        })
    }

    fn parse_switch(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "SwitchStatement", |p, g| {
            g.expect(TokenKind::SwitchKeyword)?;
            g.expect(TokenKind::OpenParenToken)?;
            let discriminant = p.parse_expression(g, ctx.with_in())?;
            g.expect(TokenKind::CloseParenToken)?;
            g.expect(TokenKind::OpenBraceToken)?;

            let mut cases = Vec::new();
            let mut seen_default = false;
            while !g.at(TokenKind::CloseBraceToken) {
                let start = g.end();
                let test = if g.accept(TokenKind::CaseKeyword) {
                    Some(p.parse_expression(g, ctx.with_in())?)
                } else if g.at(TokenKind::DefaultKeyword) {
                    if seen_default {
                        return Err(g.expected("at most one `default` clause"));
                    }
                    g.skip();
                    seen_default = true;
                    None
                } else {
                    return Err(g.expected("`case` or `default`"));
                };
                g.expect(TokenKind::ColonToken)?;

                let mut consequent = Vec::new();
                while !matches!(
                    g.peek_kind(),
                    TokenKind::CaseKeyword
                        | TokenKind::DefaultKeyword
                        | TokenKind::CloseBraceToken
                        | TokenKind::EndOfInput
                ) {
                    consequent.push(p.parse_item(g, ctx, false)?);
                }
                cases.push(SwitchCase {
                    span: g.since(start),
                    test,
                    consequent,
                });
            }
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(Statement::Switch(Box::new(SwitchStatement {
                span: g.span(),
                discriminant,
                cases,
            })))
        })
    }

    fn parse_labeled(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "LabelledStatement", |p, g| {
            let label = p.parse_identifier(g, ctx)?;
            g.expect(TokenKind::ColonToken)?;
            let body = p.parse_statement(g, ctx)?;
            Ok(Statement::Labeled(Box::new(LabeledStatement {
                span: g.span(),
                label,
                body,
            })))
        })
    }

    fn parse_throw(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "ThrowStatement", |p, g| {
            g.expect(TokenKind::ThrowKeyword)?;
            if g.line_terminator_ahead() {
                return Err(g.expected("expression on the same line as `throw`"));
            }
            let argument = p.parse_expression(g, ctx.with_in())?;
            g.expect_semicolon()?;
            Ok(Statement::Throw(ThrowStatement {
                span: g.span(),
                argument,
            }))
        })
    }

    fn parse_try(&mut self, parent: &mut Goal<'b, 'src>, ctx: Context) -> PResult<Statement<'src>> {
        self.production(parent, "TryStatement", |p, g| {
            g.expect(TokenKind::TryKeyword)?;
            let block = p.parse_block(g, ctx)?;

            let handler = if g.at(TokenKind::CatchKeyword) {
                let start = g.end();
                g.skip();
                let param = if g.accept(TokenKind::OpenParenToken) {
                    let param = p.parse_binding_pattern(g, ctx)?;
                    p.ts_type_annotation(g)?;
                    g.expect(TokenKind::CloseParenToken)?;
                    Some(param)
                } else {
                    None
                };
                let body = p.parse_block(g, ctx)?;
                Some(CatchClause {
                    span: g.since(start),
                    param,
                    body,
                })
            } else {
                None
            };

            let finalizer = if g.accept(TokenKind::FinallyKeyword) {
                Some(p.parse_block(g, ctx)?)
            } else {
                None
            };
            if handler.is_none() && finalizer.is_none() {
                return Err(g.expected("`catch` or `finally`"));
            }
            Ok(Statement::Try(Box::new(TryStatement {
                span: g.span(),
                block,
                handler,
                finalizer,
            })))
        })
    }
}
