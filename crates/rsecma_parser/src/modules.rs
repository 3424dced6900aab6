//! `import` and `export` declarations.
//!
//! TypeScript-only forms (`import type`, `import x = require(…)`,
//! `export =`, `export as namespace`, `export type { … }`, exported type
//! declarations) are recognized and erased.

use crate::context::Context;
use crate::cursor::Goal;
use crate::parser::{PResult, Parser, Step};
use rsecma_ast::*;

impl<'b, 'src> Parser<'b, 'src> {
    pub(crate) fn parse_import_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "ImportDeclaration", |p, g| {
            let ts = p.typescript();
            g.expect(TokenKind::ImportKeyword)?;

            let mut type_only = false;
            if ts && g.at_word("type") {
                let next = g.peek_nth(1);
                let starts_clause = matches!(
                    next.kind,
                    TokenKind::OpenBraceToken | TokenKind::AsteriskToken
                ) || (next.kind == TokenKind::Identifier && !next.is_word("from"));
                if starts_clause {
                    g.skip();
                    type_only = true;
                }
            }

            if ts && g.at(TokenKind::Identifier) && g.peek_nth_kind(1) == TokenKind::EqualsToken {
                g.skip();
                g.skip();
                p.ts_module_reference(g)?;
                g.expect_semicolon()?;
                return Ok(Statement::Erased(g.span()));
            }

            let mut specifiers = Vec::new();
            if !g.at(TokenKind::StringLiteral) {
                let mut more = true;
                if g.at(TokenKind::Identifier) {
                    specifiers.push(ImportSpecifier::Default(p.parse_identifier(g, ctx)?));
                    more = g.accept(TokenKind::CommaToken);
                }
                if more {
                    match g.peek_kind() {
                        TokenKind::AsteriskToken => {
                            let start = g.end();
                            g.skip();
                            g.expect_word("as")?;
                            let local = p.parse_identifier(g, ctx)?;
                            specifiers.push(ImportSpecifier::Namespace(NamespaceSpecifier {
                                span: g.since(start),
                                local,
                            }));
                        }
                        TokenKind::OpenBraceToken => p.parse_named_imports(g, ctx, &mut specifiers)?,
                        _ => return Err(g.expected("import specifiers")),
                    }
                }
                g.expect_word("from")?;
            }

            let source = p.parse_string_literal(g)?;
            let attributes = p.parse_import_attributes(g)?;
            g.expect_semicolon()?;
            if type_only {
                return Ok(Statement::Erased(g.span()));
            }
            Ok(Statement::Import(Box::new(ImportDeclaration {
                span: g.span(),
                specifiers,
                source,
                attributes,
            })))
        })
    }

    /// Whether the next token is an inline TypeScript `type` modifier on an
    /// import or export specifier.
    fn at_inline_type_modifier(&self, g: &Goal<'b, 'src>) -> bool {
        if !self.typescript() || !g.at_word("type") {
            return false;
        }
        let next = g.peek_nth(1);
        (next.kind.is_identifier_name() || next.kind == TokenKind::StringLiteral) && !next.is_word("as")
    }

    fn parse_named_imports(
        &mut self,
        g: &mut Goal<'b, 'src>,
        ctx: Context,
        specifiers: &mut Vec<ImportSpecifier<'src>>,
    ) -> Step<()> {
        g.expect(TokenKind::OpenBraceToken)?;
        while !g.at(TokenKind::CloseBraceToken) {
            let start = g.end();
            let type_only = self.at_inline_type_modifier(g);
            if type_only {
                g.skip();
            }
            let imported_kind = g.peek_kind();
            let imported = self.parse_module_export_name(g)?;
            let specifier = if g.accept_word("as") {
                let local = self.parse_identifier(g, ctx)?;
                NamedImport {
                    span: g.since(start),
                    imported: Some(imported),
                    local,
                }
            } else {
                match imported {
                    ModuleExportName::Identifier(local) if imported_kind == TokenKind::Identifier => {
                        NamedImport {
                            span: g.since(start),
                            imported: None,
                            local,
                        }
                    }
                    _ => return Err(g.expected("`as`")),
                }
            };
            if !type_only {
                specifiers.push(ImportSpecifier::Named(specifier));
            }
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
        }
        g.expect(TokenKind::CloseBraceToken)?;
        Ok(())
    }

    /// An export or import name: any `IdentifierName` or a string.
    fn parse_module_export_name(&mut self, g: &mut Goal<'b, 'src>) -> Step<ModuleExportName<'src>> {
        if g.at(TokenKind::StringLiteral) {
            Ok(ModuleExportName::String(self.parse_literal(g)?))
        } else {
            Ok(ModuleExportName::Identifier(self.parse_identifier_name(g)?))
        }
    }

    /// `with { type: "json" }`, or the older `assert { … }` on the same line.
    fn parse_import_attributes(&mut self, g: &mut Goal<'b, 'src>) -> Step<Vec<ImportAttribute<'src>>> {
        let introduced = g.accept(TokenKind::WithKeyword)
            || (g.at_word("assert") && !g.line_terminator_ahead() && g.accept_word("assert"));
        if !introduced {
            return Ok(Vec::new());
        }
        g.expect(TokenKind::OpenBraceToken)?;
        let mut attributes = Vec::new();
        while !g.at(TokenKind::CloseBraceToken) {
            let start = g.end();
            let key = self.parse_module_export_name(g)?;
            g.expect(TokenKind::ColonToken)?;
            let value = self.parse_string_literal(g)?;
            attributes.push(ImportAttribute {
                span: g.since(start),
                key,
                value,
            });
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
        }
        g.expect(TokenKind::CloseBraceToken)?;
        Ok(attributes)
    }

    pub(crate) fn parse_export_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "ExportDeclaration", |p, g| {
            let ts = p.typescript();
            g.expect(TokenKind::ExportKeyword)?;

            if ts {
                if g.accept(TokenKind::EqualsToken) {
                    p.parse_expression(g, ctx.with_in())?;
                    g.expect_semicolon()?;
                    return Ok(Statement::Erased(g.span()));
                }
                if g.at_word("as") && g.peek_nth(1).is_word("namespace") {
                    g.skip();
                    g.skip();
                    p.parse_identifier(g, ctx)?;
                    g.expect_semicolon()?;
                    return Ok(Statement::Erased(g.span()));
                }
                if g.at(TokenKind::ImportKeyword) {
                    p.parse_import_declaration(g, ctx)?;
                    return Ok(Statement::Erased(g.span()));
                }
                if g.at_word("type")
                    && matches!(
                        g.peek_nth_kind(1),
                        TokenKind::OpenBraceToken | TokenKind::AsteriskToken
                    )
                {
                    g.skip();
                    p.parse_export_clause(g)?;
                    return Ok(Statement::Erased(g.span()));
                }
            }

            let declaration = match g.peek_kind() {
                TokenKind::AsteriskToken | TokenKind::OpenBraceToken => {
                    return Ok(Statement::Export(Box::new(p.parse_export_clause(g)?)));
                }
                TokenKind::DefaultKeyword => return p.parse_export_default(g, ctx),
                TokenKind::VarKeyword => p.parse_variable_statement(g, ctx)?,
                TokenKind::ConstKeyword if ts && g.peek_nth_kind(1) == TokenKind::EnumKeyword => {
                    p.ts_declaration(g, ctx)?
                }
                TokenKind::ConstKeyword => p.parse_lexical_declaration(g, ctx)?,
                TokenKind::Identifier if g.at_word("let") => p.parse_lexical_declaration(g, ctx)?,
                TokenKind::FunctionKeyword => p.parse_function_declaration(g, ctx)?,
                TokenKind::Identifier
                    if g.at_word("async")
                        && g.peek_nth_kind(1) == TokenKind::FunctionKeyword
                        && !g.line_terminator_after_nth(0) =>
                {
                    p.parse_function_declaration(g, ctx)?
                }
                TokenKind::ClassKeyword => Statement::Class(Box::new(p.parse_class_declaration(g, ctx)?)),
                TokenKind::AtToken if ts => {
                    p.ts_decorators(g, ctx)?;
                    Statement::Class(Box::new(p.parse_class_declaration(g, ctx)?))
                }
                _ if p.ts_declaration_ahead(g) => p.ts_declaration(g, ctx)?,
                _ => return Err(g.expected("declaration")),
            };
            if matches!(declaration, Statement::Erased(_)) {
                return Ok(Statement::Erased(g.span()));
            }
            Ok(Statement::Export(Box::new(ExportDeclaration::Declaration(ExportDecl {
                span: g.span(),
                declaration,
            }))))
        })
    }

    /// `* [as name] from "m"` or `{ a, b as c } [from "m"]`, after `export`.
    fn parse_export_clause(&mut self, g: &mut Goal<'b, 'src>) -> Step<ExportDeclaration<'src>> {
        let start = g.start();
        if g.accept(TokenKind::AsteriskToken) {
            let exported = if g.accept_word("as") {
                Some(self.parse_module_export_name(g)?)
            } else {
                None
            };
            g.expect_word("from")?;
            let source = self.parse_string_literal(g)?;
            let attributes = self.parse_import_attributes(g)?;
            g.expect_semicolon()?;
            return Ok(ExportDeclaration::All(ExportAll {
                span: g.since(start),
                exported,
                source,
                attributes,
            }));
        }

        g.expect(TokenKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !g.at(TokenKind::CloseBraceToken) {
            let spec_start = g.end();
            let type_only = self.at_inline_type_modifier(g);
            if type_only {
                g.skip();
            }
            let local = self.parse_module_export_name(g)?;
            let exported = if g.accept_word("as") {
                Some(self.parse_module_export_name(g)?)
            } else {
                None
            };
            if !type_only {
                specifiers.push(ExportSpecifier {
                    span: g.since(spec_start),
                    local,
                    exported,
                });
            }
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
        }
        g.expect(TokenKind::CloseBraceToken)?;
        let (source, attributes) = if g.accept_word("from") {
            let source = self.parse_string_literal(g)?;
            (Some(source), self.parse_import_attributes(g)?)
        } else {
            (None, Vec::new())
        };
        g.expect_semicolon()?;
        Ok(ExportDeclaration::Named(ExportNamed {
            span: g.since(start),
            specifiers,
            source,
            attributes,
        }))
    }

    fn parse_export_default(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> Step<Statement<'src>> {
        let ts = self.typescript();
        g.expect(TokenKind::DefaultKeyword)?;
        let is_async_function = g.at_word("async")
            && g.peek_nth_kind(1) == TokenKind::FunctionKeyword
            && !g.line_terminator_after_nth(0);

        let value = if g.at(TokenKind::FunctionKeyword) || is_async_function {
            match self.parse_default_function(g, ctx)? {
                Some(function) => ExportDefaultValue::Function(Box::new(function)),
                None => return Ok(Statement::Erased(g.span())),
            }
        } else if g.at(TokenKind::ClassKeyword)
            || (ts && g.at_word("abstract") && g.peek_nth_kind(1) == TokenKind::ClassKeyword)
        {
            ExportDefaultValue::Class(Box::new(self.parse_default_class(g, ctx)?))
        } else if ts && g.at_word("interface") && g.peek_nth_kind(1) == TokenKind::Identifier {
            self.ts_declaration(g, ctx)?;
            return Ok(Statement::Erased(g.span()));
        } else {
            let expression = self.parse_assignment(g, ctx.with_in())?;
            g.expect_semicolon()?;
            ExportDefaultValue::Expression(expression)
        };
        Ok(Statement::Export(Box::new(ExportDeclaration::Default(ExportDefault {
            span: g.span(),
            value,
        }))))
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_module, parse_module_typescript, parse_script};
    use rsecma_ast::*;

    fn module_items(source: &str) -> Vec<Statement<'_>> {
        parse_module(source).unwrap().body
    }

    #[test]
    fn test_import_forms() {
        let items = module_items(
            "import a from 'a';\n\
             import * as b from 'b';\n\
             import c, { d, e as f, 'g h' as i } from 'c';\n\
             import 'side-effect';\n\
             import j from './data.json' with { type: 'json' };",
        );
        assert_eq!(items.len(), 5);
        match &items[2] {
            Statement::Import(decl) => {
                assert_eq!(decl.specifiers.len(), 4);
                assert!(matches!(decl.specifiers[0], ImportSpecifier::Default(_)));
            }
            other => panic!("expected import, got {:?}", other),
        }
        match &items[3] {
            Statement::Import(decl) => assert!(decl.specifiers.is_empty()),
            other => panic!("expected import, got {:?}", other),
        }
        match &items[4] {
            Statement::Import(decl) => assert_eq!(decl.attributes.len(), 1),
            other => panic!("expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_string_import_needs_alias() {
        assert!(parse_module("import { 'a b' } from 'm';").is_err());
        assert!(parse_module("import { default } from 'm';").is_err());
        assert!(parse_module("import { default as d } from 'm';").is_ok());
    }

    #[test]
    fn test_export_forms() {
        let items = module_items(
            "export * from 'a';\n\
             export * as ns from 'b';\n\
             export { x, y as z };\n\
             export { default } from 'c';\n\
             export const k = 1;\n\
             export default function () {}\n\
             export class K {}\n\
             export async function f() {}",
        );
        assert_eq!(items.len(), 8);
        assert!(matches!(&items[0], Statement::Export(e) if matches!(**e, ExportDeclaration::All(_))));
        assert!(matches!(&items[2], Statement::Export(e) if matches!(**e, ExportDeclaration::Named(_))));
        assert!(matches!(
            &items[5],
            Statement::Export(e) if matches!(**e, ExportDeclaration::Default(_))
        ));
    }

    #[test]
    fn test_export_default_expression() {
        let items = module_items("export default a + b;");
        match &items[0] {
            Statement::Export(e) => match &**e {
                ExportDeclaration::Default(d) => {
                    assert!(matches!(d.value, ExportDefaultValue::Expression(Expression::Binary(_))))
                }
                other => panic!("expected default export, got {:?}", other),
            },
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_import_call_in_script() {
        assert!(parse_script("import('m').then(f);").is_ok());
        assert!(parse_script("import a from 'a';").is_err());
    }

    #[test]
    fn test_typescript_module_forms_are_erased() {
        let program = parse_module_typescript(
            "import type { T } from './t';\n\
             import { type U, V } from './u';\n\
             import fs = require('fs');\n\
             export type { T };\n\
             export interface I { a: string }\n\
             export type Alias = string | number;\n\
             export = V;",
        )
        .unwrap();
        assert!(matches!(program.body[0], Statement::Erased(_)));
        match &program.body[1] {
            Statement::Import(decl) => assert_eq!(decl.specifiers.len(), 1),
            other => panic!("expected import, got {:?}", other),
        }
        for stmt in &program.body[2..] {
            assert!(matches!(stmt, Statement::Erased(_)), "not erased: {:?}", stmt);
        }
    }
}
