//! TypeScript tolerance.
//!
//! Type syntax is recognized and skipped: annotations, type parameters and
//! arguments, assertions, decorators, and type-only declarations. None of it
//! reaches the tree. Erased tokens belong to the span of the enclosing node,
//! and statements with no runtime counterpart become [`Statement::Erased`].
//!
//! Every hook here returns `Ok(false)` (or does nothing) unless the options
//! enable TypeScript, so the ECMAScript productions can call them freely.

use crate::context::Context;
use crate::cursor::Goal;
use crate::expressions::starts_property_name;
use crate::parser::{PResult, Parser, Step};
use rsecma_ast::{Statement, TokenKind};
use rsecma_diagnostics::ErrorCause;

const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Whether `kind` can begin a type.
fn starts_type(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier
        || matches!(
            kind,
            TokenKind::OpenParenToken
                | TokenKind::OpenBracketToken
                | TokenKind::OpenBraceToken
                | TokenKind::LessThanToken
                | TokenKind::MinusToken
                | TokenKind::StringLiteral
                | TokenKind::NumericLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::NoSubstitutionTemplate
                | TokenKind::TemplateHead
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
                | TokenKind::NullKeyword
                | TokenKind::VoidKeyword
                | TokenKind::ThisKeyword
                | TokenKind::TypeOfKeyword
                | TokenKind::ImportKeyword
                | TokenKind::NewKeyword
        )
}

impl<'b, 'src> Parser<'b, 'src> {
    // ========================================================================
    // Hooks called from the ECMAScript grammar
    // ========================================================================

    /// `: Type`
    pub(crate) fn ts_type_annotation(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::ColonToken) {
            return Ok(false);
        }
        self.production(g, "TypeAnnotation", |p, g| {
            g.skip();
            p.parse_type(g)
        })?;
        Ok(true)
    }

    /// `: Type` after a parameter list, where a type predicate may stand in
    /// for the type.
    pub(crate) fn ts_return_annotation(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::ColonToken) {
            return Ok(false);
        }
        self.production(g, "ReturnType", |p, g| {
            g.skip();
            p.parse_return_type(g, true)
        })?;
        Ok(true)
    }

    /// `<T extends U = V, …>` on a declaration.
    pub(crate) fn ts_type_parameters(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::LessThanToken) {
            return Ok(false);
        }
        self.production(g, "TypeParameters", |p, g| {
            g.skip();
            loop {
                while (g.at(TokenKind::ConstKeyword) || g.at(TokenKind::InKeyword) || g.at_word("out"))
                    && g.peek_nth_kind(1) == TokenKind::Identifier
                {
                    g.skip();
                }
                g.expect(TokenKind::Identifier)?;
                if g.accept(TokenKind::ExtendsKeyword) {
                    p.parse_type(g)?;
                }
                if g.accept(TokenKind::EqualsToken) {
                    p.parse_type(g)?;
                }
                if !g.accept(TokenKind::CommaToken) || g.at(TokenKind::GreaterThanToken) {
                    break;
                }
            }
            g.expect(TokenKind::GreaterThanToken)?;
            Ok(())
        })?;
        Ok(true)
    }

    /// `<A, B>` where only type arguments can appear, as after `extends X`
    /// in a class heritage.
    pub(crate) fn ts_type_arguments(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::LessThanToken) {
            return Ok(false);
        }
        self.production(g, "TypeArguments", |p, g| p.parse_type_argument_list(g))?;
        Ok(true)
    }

    /// `<A, B>` in an expression, where `<` could equally be less-than. The
    /// arguments are taken only when what follows them cannot continue a
    /// comparison; otherwise nothing is consumed.
    pub(crate) fn ts_call_type_arguments(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::LessThanToken) {
            return Ok(false);
        }
        let taken = self.optional(g, "TypeArguments", |p, g| {
            p.parse_type_argument_list(g)?;
            let follows = matches!(
                g.peek_kind(),
                TokenKind::OpenParenToken
                    | TokenKind::NoSubstitutionTemplate
                    | TokenKind::TemplateHead
                    | TokenKind::CloseParenToken
                    | TokenKind::CloseBracketToken
                    | TokenKind::CloseBraceToken
                    | TokenKind::SemicolonToken
                    | TokenKind::CommaToken
                    | TokenKind::ColonToken
                    | TokenKind::EndOfInput
            ) || g.line_terminator_ahead();
            if follows {
                Ok(())
            } else {
                Err(g.expected("`(` after type arguments"))
            }
        })?;
        Ok(taken.is_some())
    }

    /// `expr as Type`, `expr as const` and `expr satisfies Type`, with the
    /// cursor on `as` or `satisfies`.
    pub(crate) fn ts_type_assertion(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() {
            return Ok(false);
        }
        self.production(g, "TypeAssertion", |p, g| {
            let word = g.skip();
            if word.raw == "as" && g.accept(TokenKind::ConstKeyword) {
                return Ok(());
            }
            p.parse_type(g)
        })?;
        Ok(true)
    }

    /// Any number of `@expr` decorators.
    pub(crate) fn ts_decorators(&mut self, g: &mut Goal<'b, 'src>, ctx: Context) -> PResult<bool> {
        if !self.typescript() || !g.at(TokenKind::AtToken) {
            return Ok(false);
        }
        while g.at(TokenKind::AtToken) {
            self.production(g, "Decorator", |p, g| {
                g.skip();
                if g.accept(TokenKind::OpenParenToken) {
                    p.parse_expression(g, ctx.with_in())?;
                    g.expect(TokenKind::CloseParenToken)?;
                    return Ok(());
                }
                p.parse_identifier(g, ctx)?;
                while g.accept(TokenKind::DotToken) {
                    p.parse_identifier_name(g)?;
                }
                p.ts_call_type_arguments(g)?;
                if g.at(TokenKind::OpenParenToken) {
                    p.parse_arguments(g, ctx)?;
                }
                Ok(())
            })?;
        }
        Ok(true)
    }

    /// `[key: K]: V` in a class body, with its separator.
    pub(crate) fn ts_index_signature(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !self.index_signature_ahead(g) {
            return Ok(false);
        }
        self.production(g, "IndexSignature", |p, g| {
            p.parse_index_signature(g)?;
            g.accept_any(&[TokenKind::SemicolonToken, TokenKind::CommaToken]);
            Ok(())
        })?;
        Ok(true)
    }

    /// `implements A, B<C>` on a class.
    pub(crate) fn ts_implements(&mut self, g: &mut Goal<'b, 'src>) -> PResult<bool> {
        if !self.typescript() || !g.at_word("implements") {
            return Ok(false);
        }
        self.production(g, "ImplementsClause", |p, g| {
            g.skip();
            loop {
                p.parse_type_reference(g)?;
                if !g.accept(TokenKind::CommaToken) {
                    break;
                }
            }
            Ok(())
        })?;
        Ok(true)
    }

    /// Accessibility and `readonly` on a constructor parameter.
    pub(crate) fn ts_parameter_modifiers(&self, g: &mut Goal<'b, 'src>) {
        if !self.typescript() {
            return;
        }
        loop {
            let token = g.peek();
            let modifies = token.kind == TokenKind::Identifier
                && PARAMETER_MODIFIERS.contains(&token.raw)
                && matches!(
                    g.peek_nth_kind(1),
                    TokenKind::Identifier
                        | TokenKind::OpenBraceToken
                        | TokenKind::OpenBracketToken
                        | TokenKind::DotDotDotToken
                );
            if !modifies {
                break;
            }
            g.skip();
        }
    }

    /// The module reference of `import x = …`: `require("m")` or `A.B`.
    pub(crate) fn ts_module_reference(&mut self, g: &mut Goal<'b, 'src>) -> PResult<()> {
        self.production(g, "ModuleReference", |p, g| {
            if g.at_word("require") && g.peek_nth_kind(1) == TokenKind::OpenParenToken {
                g.skip();
                g.skip();
                g.expect(TokenKind::StringLiteral)?;
                g.expect(TokenKind::CloseParenToken)?;
                return Ok(());
            }
            p.parse_identifier_name(g)?;
            while g.accept(TokenKind::DotToken) {
                p.parse_identifier_name(g)?;
            }
            Ok(())
        })
    }

    /// Whether the next tokens begin a type-only or ambient declaration.
    /// The words involved are ordinary identifiers too, so callers still
    /// fall back to a statement when the declaration fails.
    pub(crate) fn ts_declaration_ahead(&self, g: &Goal<'b, 'src>) -> bool {
        if !self.typescript() {
            return false;
        }
        let token = g.peek();
        let next = g.peek_nth(1);
        let same_line = !g.line_terminator_after_nth(0);
        match token.kind {
            TokenKind::EnumKeyword => true,
            TokenKind::ConstKeyword => next.kind == TokenKind::EnumKeyword,
            TokenKind::Identifier => match token.raw {
                "interface" | "type" | "namespace" => next.kind == TokenKind::Identifier && same_line,
                "module" => {
                    matches!(next.kind, TokenKind::Identifier | TokenKind::StringLiteral) && same_line
                }
                "declare" => {
                    (next.kind == TokenKind::Identifier || next.kind.is_keyword()) && same_line
                }
                "abstract" => next.kind == TokenKind::ClassKeyword && same_line,
                "global" => next.kind == TokenKind::OpenBraceToken,
                _ => false,
            },
            _ => false,
        }
    }

    /// A declaration for which [`Parser::ts_declaration_ahead`] held.
    pub(crate) fn ts_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        let token = parent.peek();
        match token.kind {
            TokenKind::EnumKeyword | TokenKind::ConstKeyword => self.parse_enum_declaration(parent),
            _ => match token.raw {
                "interface" => self.parse_interface_declaration(parent),
                "type" => self.parse_type_alias(parent),
                "namespace" | "module" | "global" => self.parse_module_declaration(parent),
                "declare" => self.parse_ambient_declaration(parent, ctx),
                "abstract" => Ok(Statement::Class(Box::new(
                    self.parse_class_declaration(parent, ctx)?,
                ))),
                _ => Err(parent.error(ErrorCause::Expected("declaration"), "Declaration")),
            },
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_interface_declaration(&mut self, parent: &mut Goal<'b, 'src>) -> PResult<Statement<'src>> {
        self.production(parent, "InterfaceDeclaration", |p, g| {
            g.expect_word("interface")?;
            g.expect(TokenKind::Identifier)?;
            p.ts_type_parameters(g)?;
            if g.accept(TokenKind::ExtendsKeyword) {
                loop {
                    p.parse_type_reference(g)?;
                    if !g.accept(TokenKind::CommaToken) {
                        break;
                    }
                }
            }
            p.parse_type_members(g)?;
            Ok(Statement::Erased(g.span()))
        })
    }

    fn parse_type_alias(&mut self, parent: &mut Goal<'b, 'src>) -> PResult<Statement<'src>> {
        self.production(parent, "TypeAliasDeclaration", |p, g| {
            g.expect_word("type")?;
            g.expect(TokenKind::Identifier)?;
            p.ts_type_parameters(g)?;
            g.expect(TokenKind::EqualsToken)?;
            p.parse_type(g)?;
            g.expect_semicolon()?;
            Ok(Statement::Erased(g.span()))
        })
    }

    /// `[const] enum E { A, B = 1 }`
    fn parse_enum_declaration(&mut self, parent: &mut Goal<'b, 'src>) -> PResult<Statement<'src>> {
        self.production(parent, "EnumDeclaration", |p, g| {
            g.accept(TokenKind::ConstKeyword);
            g.expect(TokenKind::EnumKeyword)?;
            g.expect(TokenKind::Identifier)?;
            g.expect(TokenKind::OpenBraceToken)?;
            while !g.at(TokenKind::CloseBraceToken) {
                p.parse_property_key(g, Context::empty(), false)?;
                if g.accept(TokenKind::EqualsToken) {
                    p.parse_assignment(g, Context::IN)?;
                }
                if !g.accept(TokenKind::CommaToken) {
                    break;
                }
            }
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(Statement::Erased(g.span()))
        })
    }

    /// `namespace A.B { … }`, `module "m" { … }`, `declare module "m";` and
    /// `global { … }`.
    fn parse_module_declaration(&mut self, parent: &mut Goal<'b, 'src>) -> PResult<Statement<'src>> {
        self.production(parent, "ModuleDeclaration", |p, g| {
            let word = g.skip();
            if word.raw != "global" {
                if g.accept(TokenKind::StringLiteral) {
                    if !g.at(TokenKind::OpenBraceToken) {
                        g.expect_semicolon()?;
                        return Ok(Statement::Erased(g.span()));
                    }
                } else {
                    g.expect(TokenKind::Identifier)?;
                    while g.accept(TokenKind::DotToken) {
                        p.parse_identifier_name(g)?;
                    }
                }
            }
            g.expect(TokenKind::OpenBraceToken)?;
            p.parse_items(g, Context::empty(), true, TokenKind::CloseBraceToken)?;
            g.expect(TokenKind::CloseBraceToken)?;
            Ok(Statement::Erased(g.span()))
        })
    }

    /// `declare …`: the declaration is checked but never kept.
    fn parse_ambient_declaration(
        &mut self,
        parent: &mut Goal<'b, 'src>,
        ctx: Context,
    ) -> PResult<Statement<'src>> {
        self.production(parent, "AmbientDeclaration", |p, g| {
            g.expect_word("declare")?;
            match g.peek_kind() {
                TokenKind::VarKeyword => {
                    p.parse_variable_statement(g, ctx)?;
                }
                TokenKind::ConstKeyword if g.peek_nth_kind(1) == TokenKind::EnumKeyword => {
                    p.ts_declaration(g, ctx)?;
                }
                TokenKind::ConstKeyword => {
                    p.parse_lexical_declaration(g, ctx)?;
                }
                TokenKind::Identifier if g.at_word("let") => {
                    p.parse_lexical_declaration(g, ctx)?;
                }
                TokenKind::FunctionKeyword => {
                    p.parse_function_declaration(g, ctx)?;
                }
                TokenKind::Identifier
                    if g.at_word("async") && g.peek_nth_kind(1) == TokenKind::FunctionKeyword =>
                {
                    p.parse_function_declaration(g, ctx)?;
                }
                TokenKind::ClassKeyword => {
                    p.parse_class_declaration(g, ctx)?;
                }
                _ if p.ts_declaration_ahead(g) => {
                    p.ts_declaration(g, ctx)?;
                }
                _ => return Err(g.expected("declaration after `declare`")),
            }
            Ok(Statement::Erased(g.span()))
        })
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn parse_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        self.parse_type_with(g, true)
    }

    /// A type. With `conditional` false an `extends` after the type ends it
    /// instead of starting a conditional type, as inside a conditional
    /// type's own `extends` clause.
    fn parse_type_with(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        self.nested(g, "Type", |p, g| {
            if p.function_type_ahead(g) {
                return p.parse_function_type(g, conditional);
            }
            if g.at(TokenKind::NewKeyword)
                || (g.at_word("abstract") && g.peek_nth_kind(1) == TokenKind::NewKeyword)
            {
                g.accept_word("abstract");
                g.skip();
                return p.parse_function_type(g, conditional);
            }

            p.parse_union_type(g, conditional)?;
            if conditional && !g.line_terminator_ahead() && g.accept(TokenKind::ExtendsKeyword) {
                p.parse_type_with(g, false)?;
                g.expect(TokenKind::QuestionToken)?;
                p.parse_type(g)?;
                g.expect(TokenKind::ColonToken)?;
                p.parse_type(g)?;
            }
            Ok(())
        })?;
        Ok(())
    }

    /// `(` begins a function type only when its matching `)` is followed by
    /// `=>`.
    fn function_type_ahead(&self, g: &Goal<'b, 'src>) -> bool {
        match g.peek_kind() {
            TokenKind::LessThanToken => true,
            TokenKind::OpenParenToken => g
                .matching_close(g.peek_index())
                .is_some_and(|close| g.kind_after(close) == TokenKind::EqualsGreaterThanToken),
            _ => false,
        }
    }

    /// `<T>(params) => Return`, after any `new`.
    fn parse_function_type(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        self.ts_type_parameters(g)?;
        self.parse_formal_parameters(g, Context::empty())?;
        g.expect(TokenKind::EqualsGreaterThanToken)?;
        self.parse_return_type(g, conditional)
    }

    /// A type or a predicate: `x is T`, `asserts x`, `asserts x is T`.
    fn parse_return_type(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        let subject = matches!(g.peek_nth_kind(1), TokenKind::Identifier | TokenKind::ThisKeyword);
        if g.at_word("asserts") && subject && !g.line_terminator_after_nth(0) {
            g.skip();
            g.skip();
            if g.accept_word("is") {
                self.parse_type_with(g, conditional)?;
            }
            return Ok(());
        }
        if matches!(g.peek_kind(), TokenKind::Identifier | TokenKind::ThisKeyword)
            && g.peek_nth(1).is_word("is")
            && !g.line_terminator_after_nth(0)
        {
            g.skip();
            g.skip();
        }
        self.parse_type_with(g, conditional)
    }

    fn parse_union_type(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        g.accept(TokenKind::BarToken);
        self.parse_intersection_type(g, conditional)?;
        while g.accept(TokenKind::BarToken) {
            self.parse_intersection_type(g, conditional)?;
        }
        Ok(())
    }

    fn parse_intersection_type(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        g.accept(TokenKind::AmpersandToken);
        self.parse_type_operator(g, conditional)?;
        while g.accept(TokenKind::AmpersandToken) {
            self.parse_type_operator(g, conditional)?;
        }
        Ok(())
    }

    /// `keyof T`, `unique symbol`, `readonly T[]` and `infer U [extends C]`.
    fn parse_type_operator(&mut self, g: &mut Goal<'b, 'src>, conditional: bool) -> Step<()> {
        while (g.at_word("keyof") || g.at_word("unique") || g.at_word("readonly"))
            && starts_type(g.peek_nth_kind(1))
        {
            g.skip();
        }
        if g.at_word("infer") && g.peek_nth_kind(1) == TokenKind::Identifier {
            g.skip();
            g.skip();
            if g.at(TokenKind::ExtendsKeyword) {
                if !conditional {
                    g.skip();
                    self.parse_type_with(g, false)?;
                } else {
                    // `infer U extends C ? …` is a conditional type, not a
                    // constraint.
                    self.optional(g, "InferConstraint", |p, g| {
                        g.skip();
                        p.parse_type_with(g, false)?;
                        if g.at(TokenKind::QuestionToken) {
                            return Err(g.expected("constraint"));
                        }
                        Ok(())
                    })?;
                }
            }
            return Ok(());
        }
        self.parse_postfix_type(g)
    }

    /// `T[]` and `T[K]`, which must start on the same line as `T`.
    fn parse_postfix_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        self.parse_primary_type(g)?;
        while !g.line_terminator_ahead() && g.accept(TokenKind::OpenBracketToken) {
            if !g.at(TokenKind::CloseBracketToken) {
                self.parse_type(g)?;
            }
            g.expect(TokenKind::CloseBracketToken)?;
        }
        Ok(())
    }

    fn parse_primary_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        match g.peek_kind() {
            TokenKind::OpenParenToken => {
                g.skip();
                self.parse_type(g)?;
                g.expect(TokenKind::CloseParenToken)?;
            }
            TokenKind::OpenBraceToken if self.mapped_type_ahead(g) => self.parse_mapped_type(g)?,
            TokenKind::OpenBraceToken => self.parse_type_members(g)?,
            TokenKind::OpenBracketToken => self.parse_tuple_type(g)?,
            TokenKind::StringLiteral
            | TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::NoSubstitutionTemplate
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword
            | TokenKind::NullKeyword
            | TokenKind::VoidKeyword
            | TokenKind::ThisKeyword => {
                g.skip();
            }
            TokenKind::MinusToken
                if matches!(
                    g.peek_nth_kind(1),
                    TokenKind::NumericLiteral | TokenKind::BigIntLiteral
                ) =>
            {
                g.skip();
                g.skip();
            }
            TokenKind::TemplateHead => self.parse_template_type(g)?,
            TokenKind::TypeOfKeyword => {
                g.skip();
                if g.at(TokenKind::ImportKeyword) {
                    self.parse_import_type(g)?;
                } else {
                    if !g.accept(TokenKind::ThisKeyword) {
                        self.parse_identifier_name(g)?;
                    }
                    while g.accept(TokenKind::DotToken) {
                        self.parse_identifier_name(g)?;
                    }
                    if g.at(TokenKind::LessThanToken) && !g.line_terminator_ahead() {
                        self.parse_type_argument_list(g)?;
                    }
                }
            }
            TokenKind::ImportKeyword => self.parse_import_type(g)?,
            TokenKind::Identifier => self.parse_type_reference(g)?,
            _ => return Err(g.expected("type")),
        }
        Ok(())
    }

    /// `A.B.C<D>`
    fn parse_type_reference(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::Identifier)?;
        while g.accept(TokenKind::DotToken) {
            self.parse_identifier_name(g)?;
        }
        if g.at(TokenKind::LessThanToken) && !g.line_terminator_ahead() {
            self.parse_type_argument_list(g)?;
        }
        Ok(())
    }

    fn parse_type_argument_list(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::LessThanToken)?;
        loop {
            self.parse_type(g)?;
            if !g.accept(TokenKind::CommaToken) || g.at(TokenKind::GreaterThanToken) {
                break;
            }
        }
        g.expect(TokenKind::GreaterThanToken)?;
        Ok(())
    }

    /// `import("m").A.B<C>`
    fn parse_import_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::ImportKeyword)?;
        g.expect(TokenKind::OpenParenToken)?;
        g.expect(TokenKind::StringLiteral)?;
        g.expect(TokenKind::CloseParenToken)?;
        while g.accept(TokenKind::DotToken) {
            self.parse_identifier_name(g)?;
        }
        if g.at(TokenKind::LessThanToken) && !g.line_terminator_ahead() {
            self.parse_type_argument_list(g)?;
        }
        Ok(())
    }

    /// `` `a${T}b` ``
    fn parse_template_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::TemplateHead)?;
        loop {
            self.parse_type(g)?;
            match g.peek_kind() {
                TokenKind::TemplateMiddle => {
                    g.skip();
                }
                TokenKind::TemplateTail => {
                    g.skip();
                    return Ok(());
                }
                _ => return Err(g.expected("`}` closing the template type")),
            }
        }
    }

    /// `[A, b?: B, ...C[]]`
    fn parse_tuple_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::OpenBracketToken)?;
        while !g.at(TokenKind::CloseBracketToken) {
            g.accept(TokenKind::DotDotDotToken);
            let named = g.at(TokenKind::Identifier)
                && (g.peek_nth_kind(1) == TokenKind::ColonToken
                    || (g.peek_nth_kind(1) == TokenKind::QuestionToken
                        && g.peek_nth_kind(2) == TokenKind::ColonToken));
            if named {
                g.skip();
                g.accept(TokenKind::QuestionToken);
                g.expect(TokenKind::ColonToken)?;
            }
            self.parse_type(g)?;
            g.accept(TokenKind::QuestionToken);
            if !g.accept(TokenKind::CommaToken) {
                break;
            }
        }
        g.expect(TokenKind::CloseBracketToken)?;
        Ok(())
    }

    /// `{ [+|-]readonly [K in T as U] [+|-]?: V }` opens like an object type;
    /// the `in` inside the brackets tells them apart.
    fn mapped_type_ahead(&self, g: &Goal<'b, 'src>) -> bool {
        let mut n = 1;
        if matches!(g.peek_nth_kind(n), TokenKind::PlusToken | TokenKind::MinusToken) {
            n += 1;
            if !g.peek_nth(n).is_word("readonly") {
                return false;
            }
        }
        if g.peek_nth(n).is_word("readonly") {
            n += 1;
        }
        g.peek_nth_kind(n) == TokenKind::OpenBracketToken
            && g.peek_nth_kind(n + 1) == TokenKind::Identifier
            && g.peek_nth_kind(n + 2) == TokenKind::InKeyword
    }

    fn parse_mapped_type(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        const SIGNS: &[TokenKind] = &[TokenKind::PlusToken, TokenKind::MinusToken];
        g.expect(TokenKind::OpenBraceToken)?;
        g.accept_any(SIGNS);
        g.accept_word("readonly");
        g.expect(TokenKind::OpenBracketToken)?;
        g.expect(TokenKind::Identifier)?;
        g.expect(TokenKind::InKeyword)?;
        self.parse_type(g)?;
        if g.accept_word("as") {
            self.parse_type(g)?;
        }
        g.expect(TokenKind::CloseBracketToken)?;
        if g.accept_any(SIGNS).is_some() {
            g.expect(TokenKind::QuestionToken)?;
        } else {
            g.accept(TokenKind::QuestionToken);
        }
        if g.accept(TokenKind::ColonToken) {
            self.parse_type(g)?;
        }
        g.accept_any(&[TokenKind::SemicolonToken, TokenKind::CommaToken]);
        g.expect(TokenKind::CloseBraceToken)?;
        Ok(())
    }

    /// The `{ … }` of an interface or object type. Members are separated by
    /// `;`, `,` or a line break.
    fn parse_type_members(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::OpenBraceToken)?;
        while !g.at(TokenKind::CloseBraceToken) && !g.at_end() {
            self.parse_type_member(g)?;
            let separated = g
                .accept_any(&[TokenKind::SemicolonToken, TokenKind::CommaToken])
                .is_some();
            if !separated && !g.at(TokenKind::CloseBraceToken) && !g.line_terminator_ahead() {
                return Err(g.fail(ErrorCause::ExpectedToken(TokenKind::SemicolonToken)));
            }
        }
        g.expect(TokenKind::CloseBraceToken)?;
        Ok(())
    }

    fn parse_type_member(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        if g.at_word("readonly") && starts_property_name(g.peek_nth_kind(1)) {
            g.skip();
        }
        if self.index_signature_ahead(g) {
            return self.parse_index_signature(g);
        }

        let signature = match g.peek_kind() {
            TokenKind::OpenParenToken | TokenKind::LessThanToken => true,
            TokenKind::NewKeyword
                if matches!(
                    g.peek_nth_kind(1),
                    TokenKind::OpenParenToken | TokenKind::LessThanToken
                ) =>
            {
                g.skip();
                true
            }
            _ => false,
        };
        if !signature {
            if (g.at_word("get") || g.at_word("set")) && starts_property_name(g.peek_nth_kind(1)) {
                g.skip();
            }
            self.parse_property_key(g, Context::empty(), false)?;
            g.accept(TokenKind::QuestionToken);
        }

        if signature || g.at(TokenKind::OpenParenToken) || g.at(TokenKind::LessThanToken) {
            self.ts_type_parameters(g)?;
            self.parse_formal_parameters(g, Context::empty())?;
            self.ts_return_annotation(g)?;
        } else {
            self.ts_type_annotation(g)?;
        }
        Ok(())
    }

    fn index_signature_ahead(&self, g: &Goal<'b, 'src>) -> bool {
        g.at(TokenKind::OpenBracketToken)
            && g.peek_nth_kind(1) == TokenKind::Identifier
            && g.peek_nth_kind(2) == TokenKind::ColonToken
    }

    /// `[key: K]: V`
    fn parse_index_signature(&mut self, g: &mut Goal<'b, 'src>) -> Step<()> {
        g.expect(TokenKind::OpenBracketToken)?;
        g.expect(TokenKind::Identifier)?;
        g.expect(TokenKind::ColonToken)?;
        self.parse_type(g)?;
        g.expect(TokenKind::CloseBracketToken)?;
        g.expect(TokenKind::ColonToken)?;
        self.parse_type(g)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_module_typescript, parse_script, parse_script_typescript};
    use rsecma_ast::{BinaryOperator, Expression, Statement};

    fn erased(source: &str) -> bool {
        match parse_script_typescript(source) {
            Ok(program) => program.body.iter().all(|s| matches!(s, Statement::Erased(_))),
            Err(err) => panic!("{}: {}", source, err),
        }
    }

    fn expression(source: &str) -> Expression<'_> {
        match parse_script_typescript(source).unwrap().body.into_iter().next() {
            Some(Statement::Expression(stmt)) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_type_aliases() {
        for source in [
            "type A = string | number;",
            "type B<T> = { readonly [K in keyof T]?: T[K] };",
            "type C<T> = T extends (infer U)[] ? U : never;",
            "type D = [a: string, b?: number, ...rest: boolean[]];",
            "type E = `prefix-${string}`;",
            "type F = (x: number) => x is 1;",
            "type G = abstract new (...args: any[]) => object;",
            "type H = typeof import('./m');",
            "type I = keyof typeof obj;",
            "type J = -1 | 'a' | true | null | void | undefined;",
            "type K = A.B.C<D>[];",
            "type L = { (x: number): string; new (x: string): L; m?(): void; get p(): number; [key: string]: any };",
            "type M<T> = T extends infer U extends string ? U : never;",
            "type N<T> = T extends (x: any) => infer R ? R : never;",
            "type O = | 'a' | 'b';",
            "type P = Array<Array<number>>;",
            "type Q = { a: string\n b: number };",
            "type R = readonly string[];",
        ] {
            assert!(erased(source), "{}", source);
        }
    }

    #[test]
    fn test_declarations_are_erased() {
        for source in [
            "interface A<T> extends B, C<T> { a: T; b?(): void }",
            "enum E { A, B = 2, 'c' = B << 1 }",
            "const enum F { A }",
            "namespace N.M { export const x = 1; }",
            "declare module 'm' { export function f(): void; }",
            "declare module 'n';",
            "declare global { interface Window { x: number } }",
            "declare const x: number;",
            "declare function f(a: string): void;",
            "declare class K { m(): void; }",
        ] {
            assert!(erased(source), "{}", source);
        }
    }

    #[test]
    fn test_contextual_words_stay_identifiers() {
        let program = parse_script_typescript("type = 1;\nnamespace\nfoo;\ndeclare;\nmodule.exports = x;").unwrap();
        assert_eq!(program.body.len(), 5);
        assert!(program.body.iter().all(|s| matches!(s, Statement::Expression(_))));
    }

    #[test]
    fn test_generic_call_versus_comparison() {
        match expression("f<string>(x);") {
            Expression::Call(_) => {}
            other => panic!("expected call, got {:?}", other),
        }
        match expression("a < b > c;") {
            Expression::Binary(bin) => assert_eq!(bin.operator, BinaryOperator::GreaterThan),
            other => panic!("expected comparison, got {:?}", other),
        }
        assert!(parse_script_typescript("for (let i = 0; i < n; i++) {}").is_ok());
    }

    #[test]
    fn test_assertions_are_erased() {
        match expression("x as unknown as string[];") {
            Expression::Identifier(id) => assert_eq!(id.name, "x"),
            other => panic!("expected bare identifier, got {:?}", other),
        }
        assert!(matches!(expression("({ a: 1 }) satisfies T;"), Expression::Parenthesized(_)));
        assert!(matches!(expression("[1, 2] as const;"), Expression::Array(_)));
        assert!(matches!(expression("a!.b;"), Expression::Member(_)));
    }

    #[test]
    fn test_predicates_and_generics() {
        assert!(parse_script_typescript(
            "function isString(x: unknown): x is string { return typeof x === 'string'; }\n\
             function assert(v: unknown): asserts v {}\n\
             const id = <T,>(x: T): T => x;\n\
             class Box<in out T extends object = {}> {}"
        )
        .is_ok());
    }

    #[test]
    fn test_decorators() {
        let source = "@Component({ selector: 'x' })\nclass A {\n  @Input() name: string;\n  constructor(@Inject(T) private t: T) {}\n}";
        assert!(parse_script_typescript(source).is_ok());
        assert!(parse_script(source).is_err());
    }

    #[test]
    fn test_typescript_only_syntax_fails_in_javascript() {
        assert!(parse_script("let x: number = 1;").is_err());
        assert!(parse_script("interface A {}").is_err());
        assert!(parse_script("enum E { A }").is_err());
        assert!(parse_module_typescript("export enum E { A }").is_ok());
    }

    #[test]
    fn test_malformed_types_fail() {
        assert!(parse_script_typescript("let x: = 1;").is_err());
        assert!(parse_script_typescript("type A = ;").is_err());
        assert!(parse_script_typescript("type B = [string;").is_err());
    }
}
