//! Function declarations and expressions, parameter lists and bodies.

use crate::context::Context;
use crate::cursor::Goal;
use crate::parser::{PResult, Parser, Step};
use rsecma_ast::{
    BindingElement, BindingRestElement, FormalParameters, Function, FunctionBody, Statement,
    TokenKind,
};
use rsecma_diagnostics::ErrorCause;

impl<'b, 'src> Parser<'b, 'src> {
    /// `function f() {}` in statement position. A TypeScript overload
    /// signature without a body is erased.
    pub(crate) fn parse_function_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "FunctionDeclaration", |p, g| {
            let bodiless = p.typescript();
            Ok(match p.parse_function_rest(g, ctx, true, bodiless)? {
                Some(function) => Statement::Function(Box::new(function)),
                None => Statement::Erased(g.span()),
            })
        })
    }

    /// `export default function …`: the name is optional.
    pub(crate) fn parse_default_function(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Option<Function<'src>>> {
        self.production(parent, "FunctionDeclaration", |p, g| {
            let bodiless = p.typescript();
            p.parse_function_rest(g, ctx, false, bodiless)
        })
    }

    pub(crate) fn parse_function_expression(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Function<'src>> {
        self.production(parent, "FunctionExpression", |p, g| {
            match p.parse_function_rest(g, ctx, false, false)? {
                Some(function) => Ok(function),
                None => Err(g.fail(ErrorCause::ExpectedToken(TokenKind::OpenBraceToken))),
            }
        })
    }

    /// `[async] function [*] [name] (params) { body }`. Returns `None` for a
    /// bodiless signature when `bodiless` allows one.
    fn parse_function_rest(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        name_required: bool,
        bodiless: bool,
    ) -> Step<Option<Function<'src>>> {
        let is_async = g.accept_word("async");
        g.expect(TokenKind::FunctionKeyword)?;
        let is_generator = g.accept(TokenKind::AsteriskToken);
        let id = if g.at(TokenKind::Identifier) {
            Some(self.parse_identifier(g, ctx)?)
        } else if name_required {
            return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::Identifier)));
        } else {
            None
        };

        self.ts_type_parameters(g)?;
        let fn_ctx = Context::function(is_async, is_generator);
        let params = self.parse_formal_parameters(g, fn_ctx)?;
        self.ts_return_annotation(g)?;
        if bodiless && !g.at(TokenKind::OpenBraceToken) {
            g.expect_semicolon()?;
            return Ok(None);
        }
        let body = self.parse_function_body(g, fn_ctx)?;
        Ok(Some(Function {
            span: g.span(),
            id,
            is_async,
            is_generator,
            params,
            body,
        }))
    }

    /// The parameters and body of a method, after its key.
    pub(crate) fn parse_method_function(
        &mut self,
        g: &mut Goal<'b, 'src>,
        is_async: bool,
        is_generator: bool,
        bodiless: bool,
    ) -> Step<Option<Function<'src>>> {
        let start = g.end();
        self.ts_type_parameters(g)?;
        let fn_ctx = Context::function(is_async, is_generator);
        let params = self.parse_formal_parameters(g, fn_ctx)?;
        self.ts_return_annotation(g)?;
        if bodiless && !g.at(TokenKind::OpenBraceToken) {
            g.expect_semicolon()?;
            return Ok(None);
        }
        let body = self.parse_function_body(g, fn_ctx)?;
        Ok(Some(Function {
            span: g.since(start),
            id: None,
            is_async,
            is_generator,
            params,
            body,
        }))
    }

    pub(crate) fn parse_formal_parameters(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<FormalParameters<'src>> {
        self.production(parent, "FormalParameters", |p, g| {
            let ts = p.typescript();
            g.expect(TokenKind::OpenParenToken)?;
            let mut items = Vec::new();
            let mut rest = None;
            while !g.at(TokenKind::CloseParenToken) {
                if ts {
                    p.ts_decorators(g, ctx)?;
                    // `this: Type` only annotates the receiver.
                    if g.at(TokenKind::ThisKeyword)
                        && matches!(
                            g.peek_nth_kind(1),
                            TokenKind::ColonToken | TokenKind::CommaToken | TokenKind::CloseParenToken
                        )
                    {
                        g.skip();
                        p.ts_type_annotation(g)?;
                        if !g.accept(TokenKind::CommaToken) {
                            break;
                        }
                        continue;
                    }
                    p.ts_parameter_modifiers(g);
                }

                let start = g.end();
                if g.accept(TokenKind::DotDotDotToken) {
                    let argument = p.parse_binding_pattern(g, ctx)?;
                    if ts {
                        g.accept(TokenKind::QuestionToken);
                        p.ts_type_annotation(g)?;
                    }
                    rest = Some(BindingRestElement {
                        span: g.since(start),
                        argument,
                    });
                    break;
                }

                let pattern = p.parse_binding_pattern(g, ctx)?;
                if ts {
                    g.accept(TokenKind::QuestionToken);
                    p.ts_type_annotation(g)?;
                }
                let default = if g.accept(TokenKind::EqualsToken) {
                    Some(p.parse_assignment(g, ctx.with_in())?)
                } else {
                    None
                };
                items.push(BindingElement {
                    span: g.since(start),
                    pattern,
                    default,
                });
                if !g.accept(TokenKind::CommaToken) {
                    break;
                }
            }
            g.expect(TokenKind::CloseParenToken)?;
            Ok(FormalParameters {
                span: g.span(),
                items,
                rest,
            })
        })
    }

    pub(crate) fn parse_function_body(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<FunctionBody<'src>> {
        self.production(parent, "FunctionBody", |p, g| {
            g.expect(TokenKind::OpenBraceToken)?;
            let statements = p.parse_items(g, ctx, false, TokenKind::CloseBraceToken)?;
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(FunctionBody {
                span: g.span(),
                statements,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, parse_script_typescript};
    use rsecma_ast::{BindingPattern, Statement};

    #[test]
    fn test_function_declaration_shape() {
        let program = parse_script("async function* f(a, [b], {c} = {}, ...d) { return a; }").unwrap();
        match &program.body[0] {
            Statement::Function(f) => {
                assert!(f.is_async && f.is_generator);
                assert_eq!(f.id.as_ref().map(|id| id.name), Some("f"));
                assert_eq!(f.params.items.len(), 3);
                assert!(matches!(f.params.items[1].pattern, BindingPattern::Array(_)));
                assert!(f.params.items[2].default.is_some());
                assert!(f.params.rest.is_some());
                assert_eq!(f.body.statements.len(), 1);
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_must_be_last() {
        assert!(parse_script("function f(...a, b) {}").is_err());
        assert!(parse_script("function f(...a,) {}").is_err());
    }

    #[test]
    fn test_return_outside_function() {
        assert!(parse_script("return 1;").is_err());
        assert!(parse_script("function f() { return\n1; }").is_ok());
    }

    #[test]
    fn test_typed_parameters() {
        let src = "function f(this: Window, a?: number, public b: string = '', ...c: any[]): void {}";
        assert!(parse_script_typescript(src).is_ok());
        assert!(parse_script(src).is_err());
    }

    #[test]
    fn test_overloads_are_erased() {
        let program = parse_script_typescript(
            "function f(a: string): void;\nfunction f(a: any) {}",
        )
        .unwrap();
        assert!(matches!(program.body[0], Statement::Erased(_)));
        assert!(matches!(program.body[1], Statement::Function(_)));
    }
}
