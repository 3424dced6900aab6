//! Class declarations, class expressions and class bodies.

use crate::context::Context;
use crate::cursor::Goal;
use crate::expressions::starts_property_name;
use crate::parser::{PResult, Parser, Step};
use rsecma_ast::{
    Class, ClassBody, ClassElement, FieldDefinition, MethodDefinition, MethodKind, PropertyKey,
    StaticBlock, TokenKind,
};
use rsecma_diagnostics::ErrorCause;

/// TypeScript member modifiers. `declare` and `abstract` members have no
/// runtime counterpart and are erased.
const TS_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "override",
    "declare",
    "abstract",
    "accessor",
];

fn starts_member(kind: TokenKind) -> bool {
    starts_property_name(kind) || kind == TokenKind::AsteriskToken
}

fn is_constructor_key(key: &PropertyKey<'_>) -> bool {
    match key {
        PropertyKey::Identifier(id) => id.name == "constructor",
        PropertyKey::String(lit) => matches!(lit.raw, "\"constructor\"" | "'constructor'"),
        _ => false,
    }
}

impl<'b, 'src> Parser<'b, 'src> {
    /// `class Name …` in statement position. With `export default` the name
    /// may be omitted; callers decide by calling `parse_class_rest` through
    /// [`Parser::parse_default_class`].
    pub(crate) fn parse_class_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Class<'src>> {
        self.production(parent, "ClassDeclaration", |p, g| p.parse_class_rest(g, ctx, true))
    }

    pub(crate) fn parse_default_class(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Class<'src>> {
        self.production(parent, "ClassDeclaration", |p, g| p.parse_class_rest(g, ctx, false))
    }

    pub(crate) fn parse_class_expression(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Class<'src>> {
        self.nested(parent, "ClassExpression", |p, g| {
            p.ts_decorators(g, ctx)?;
            p.parse_class_rest(g, ctx, false)
        })
    }

    fn parse_class_rest(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        name_required: bool,
    ) -> Step<Class<'src>> {
        let ts = self.typescript();
        if ts && g.at_word("abstract") && g.peek_nth_kind(1) == TokenKind::ClassKeyword {
            g.skip();
        }
        g.expect(TokenKind::ClassKeyword)?;
        let id = if g.at(TokenKind::Identifier) && !(ts && g.at_word("implements")) {
            Some(self.parse_identifier(g, ctx)?)
        } else if name_required {
            return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::Identifier)));
        } else {
            None
        };
        self.ts_type_parameters(g)?;

        let super_class = if g.accept(TokenKind::ExtendsKeyword) {
            let heritage = self.parse_lhs(g, ctx)?;
            self.ts_type_arguments(g)?;
            Some(heritage)
        } else {
            None
        };
        if ts && g.at_word("implements") {
            self.ts_implements(g)?;
        }

        let body = self.parse_class_body(g, ctx)?;
        Ok(Class {
            span: g.span(),
            id,
            super_class,
            body,
        })
    }

    fn parse_class_body(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<ClassBody<'src>> {
        self.production(parent, "ClassBody", |p, g| {
            g.expect(TokenKind::OpenBraceToken)?;
            let mut elements = Vec::new();
            while !g.at(TokenKind::CloseBraceToken) && !g.at_end() {
                elements.push(p.parse_class_element(g, ctx)?);
            }
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(ClassBody {
                span: g.span(),
                elements,
            })
        })
    }

    fn parse_class_element(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<ClassElement<'src>> {
        self.production(parent, "ClassElement", |p, g| {
            if g.accept(TokenKind::SemicolonToken) {
                return Ok(ClassElement::Empty(g.span()));
            }
            let ts = p.typescript();
            p.ts_decorators(g, ctx)?;

            let mut is_static = false;
            let mut erased = false;
            loop {
                if g.at_word("static") && g.peek_nth_kind(1) == TokenKind::OpenBraceToken {
                    g.skip();
                    g.skip();
                    let body = p.parse_items(g, Context::empty(), false, TokenKind::CloseBraceToken)?;
                    g.expect(TokenKind::CloseBraceToken)?;
                    return Ok(ClassElement::StaticBlock(StaticBlock {
                        span: g.span(),
                        body,
                    }));
                }
                let word = g.peek();
                if word.kind != TokenKind::Identifier || !starts_member(g.peek_nth_kind(1)) {
                    break;
                }
                if word.raw == "static" && !is_static {
                    is_static = true;
                } else if ts && TS_MODIFIERS.contains(&word.raw) {
                    erased |= matches!(word.raw, "declare" | "abstract");
                } else {
                    break;
                }
                g.skip();
            }

            if ts && p.ts_index_signature(g)? {
                return Ok(ClassElement::Erased(g.span()));
            }

            let mut is_async = false;
            let mut is_generator = false;
            let mut kind = MethodKind::Method;
            if g.at_word("async") && !g.line_terminator_after_nth(0) && starts_member(g.peek_nth_kind(1)) {
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

            let key = p.parse_property_key(g, ctx, true)?;
            if ts {
                g.accept_any(&[TokenKind::QuestionToken, TokenKind::ExclamationToken]);
            }

            let is_method = is_async
                || is_generator
                || kind != MethodKind::Method
                || g.at(TokenKind::OpenParenToken)
                || (ts && g.at(TokenKind::LessThanToken));
            if is_method {
                let Some(value) = p.parse_method_function(g, is_async, is_generator, ts)? else {
                    return Ok(ClassElement::Erased(g.span()));
                };
                if erased {
                    return Ok(ClassElement::Erased(g.span()));
                }
                if kind == MethodKind::Method && !is_static && is_constructor_key(&key) {
                    kind = MethodKind::Constructor;
                }
                return Ok(ClassElement::Method(Box::new(MethodDefinition {
                    span: g.span(),
                    key,
                    kind,
                    is_static,
                    value,
                })));
            }

            p.ts_type_annotation(g)?;
            let value = if g.accept(TokenKind::EqualsToken) {
                Some(p.parse_assignment(g, Context::IN)?)
            } else {
                None
            };
            g.expect_semicolon()?;
            if erased {
                return Ok(ClassElement::Erased(g.span()));
            }
            Ok(ClassElement::Field(Box::new(FieldDefinition {
                span: g.span(),
                key,
                is_static,
                value,
            })))
        })
    }
}
