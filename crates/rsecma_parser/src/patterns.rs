//! Binding patterns: identifiers and object / array destructuring in
//! declarations, parameters and catch clauses.

use crate::context::Context;
use crate::cursor::Goal;
use crate::parser::{PResult, Parser, Step};
use rsecma_ast::{
    ArrayPattern, BindingElement, BindingKeyValue, BindingPattern, BindingProperty,
    BindingRestElement, BindingShorthand, ObjectPattern, PropertyKey, TokenKind,
};
use rsecma_diagnostics::ErrorCause;

impl<'b, 'src> Parser<'b, 'src> {
    pub(crate) fn parse_binding_pattern(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<BindingPattern<'src>> {
        self.nested(parent, "BindingPattern", |p, g| match g.peek_kind() {
            TokenKind::Identifier => Ok(BindingPattern::Identifier(p.parse_identifier(g, ctx)?)),
            TokenKind::OpenBraceToken => p.parse_object_pattern(g, ctx),
            TokenKind::OpenBracketToken => p.parse_array_pattern(g, ctx),
            _ => Err(g.expected("binding pattern")),
        })
    }

    fn parse_object_pattern(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<BindingPattern<'src>> {
        g.expect(TokenKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        let mut rest = None;
        while !g.at(TokenKind::CloseBraceToken) {
            let start = g.end();
            if g.accept(TokenKind::DotDotDotToken) {
                let id = self.parse_identifier(g, ctx)?;
                rest = Some(BindingRestElement {
                    span: g.since(start),
                    argument: BindingPattern::Identifier(id),
                });
                break;
            }

            let key_kind = g.peek_kind();
            let key = self.parse_property_key(g, ctx, false)?;
            if g.accept(TokenKind::ColonToken) {
                let value = self.parse_binding_element(g, ctx)?;
                properties.push(BindingProperty::KeyValue(Box::new(BindingKeyValue {
                    span: g.since(start),
                    key,
                    value,
                })));
            } else {
                let name = match key {
                    PropertyKey::Identifier(id)
                        if key_kind == TokenKind::Identifier && !ctx.reserves(id.name) =>
                    {
                        id
                    }
                    _ => return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::ColonToken))),
                };
                let default = if g.accept(TokenKind::EqualsToken) {
                    Some(self.parse_assignment(g, ctx.with_in())?)
                } else {
                    None
                };
                properties.push(BindingProperty::Shorthand(BindingShorthand {
                    span: g.since(start),
                    name,
                    default,
                }));
            }
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
        }
        g.expect(TokenKind::CloseBraceToken)?;
        Ok(BindingPattern::Object(Box::new(ObjectPattern {
            span: g.span(),
            properties,
            rest,
        })))
    }

    fn parse_array_pattern(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<BindingPattern<'src>> {
        g.expect(TokenKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        let mut rest = None;
        while !g.at(TokenKind::CloseBracketToken) {
            if g.accept(TokenKind::CommaToken) {
                elements.push(None);
                continue;
            }
            if g.at(TokenKind::DotDotDotToken) {
                rest = Some(self.parse_binding_rest(g, ctx)?);
                break;
            }
            elements.push(Some(self.parse_binding_element(g, ctx)?));
            if !g.at(TokenKind::CloseBracketToken) {
                g.expect(TokenKind::CommaToken)?;
            }
        }
        g.expect(TokenKind::CloseBracketToken)?;
        Ok(BindingPattern::Array(Box::new(ArrayPattern {
            span: g.span(),
            elements,
            rest,
        })))
    }

    /// A pattern with an optional `= default`.
    pub(crate) fn parse_binding_element(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<BindingElement<'src>> {
        let start = g.end();
        let pattern = self.parse_binding_pattern(g, ctx)?;
        let default = if g.accept(TokenKind::EqualsToken) {
            Some(self.parse_assignment(g, ctx.with_in())?)
        } else {
            None
        };
        Ok(BindingElement {
            span: g.since(start),
            pattern,
            default,
        })
    }

    pub(crate) fn parse_binding_rest(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> Step<BindingRestElement<'src>> {
        let start = g.end();
        g.expect(TokenKind::DotDotDotToken)?;
        let argument = self.parse_binding_pattern(g, ctx)?;
        Ok(BindingRestElement {
            span: g.since(start),
            argument,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_script;
    use rsecma_ast::{BindingPattern, BindingProperty, Statement};

    fn declared_pattern(source: &str) -> BindingPattern<'_> {
        let program = parse_script(source).unwrap();
        match program.body.into_iter().next() {
            Some(Statement::Variable(decl)) => decl.declarations.into_iter().next().unwrap().id,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_object_pattern() {
        match declared_pattern("var { a, b: [c], d = 1, 'e': f, ...g } = o;") {
            BindingPattern::Object(obj) => {
                assert_eq!(obj.properties.len(), 4);
                match &obj.properties[2] {
                    BindingProperty::Shorthand(s) => assert!(s.default.is_some()),
                    other => panic!("expected shorthand, got {:?}", other),
                }
                assert!(obj.rest.is_some());
            }
            other => panic!("expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_array_pattern_holes() {
        match declared_pattern("let [, a, , [b] = c, ...d] = e;") {
            BindingPattern::Array(arr) => {
                assert_eq!(arr.elements.len(), 4);
                assert!(arr.elements[0].is_none());
                assert!(arr.elements[2].is_none());
                assert!(arr.rest.is_some());
            }
            other => panic!("expected array pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(parse_script("var { ...{a} } = o;").is_err());
        assert!(parse_script("var [...a, b] = o;").is_err());
        assert!(parse_script("var { if } = o;").is_err());
        assert!(parse_script("var [a] ;").is_err());
    }
}
