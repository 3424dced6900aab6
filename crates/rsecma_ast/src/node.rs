//! AST node definitions for ECMAScript programs.
//!
//! The tree is owned: parents hold their children in `Box`/`Vec`. Every node
//! records the [`TokenSpan`] it was built from, leading trivia of its first
//! token included. Child spans are ordered, non-overlapping, and contained in
//! the parent's span; tokens of the parent not covered by a child (keywords,
//! punctuation, erased type syntax) belong to the parent itself.

use crate::token::TokenBuffer;
use rsecma_core::TokenSpan;
use serde::{Deserialize, Serialize};

/// Anything that records the token span it was parsed from.
pub trait Spanned {
    fn span(&self) -> TokenSpan;
}

macro_rules! impl_spanned {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'src> Spanned for $ty<'src> {
                #[inline]
                fn span(&self) -> TokenSpan {
                    self.span
                }
            }
        )*
    };
}

// ============================================================================
// Program
// ============================================================================

/// Which top-level grammar an input was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program<'src> {
    /// Covers the whole token buffer, trailing trivia and `EndOfInput` included.
    pub span: TokenSpan,
    pub source_type: SourceType,
    pub body: Vec<Statement<'src>>,
    #[serde(skip)]
    pub tokens: TokenBuffer<'src>,
}

impl<'src> Program<'src> {
    /// The exact source text covered by `span`.
    pub fn text_of(&self, span: TokenSpan) -> &'src str {
        self.tokens.text_of(span)
    }

    /// The source text of any node of this program.
    pub fn source_of(&self, node: &impl Spanned) -> &'src str {
        self.tokens.text_of(node.span())
    }
}

// ============================================================================
// Names and literals
// ============================================================================

/// An identifier reference, binding identifier, label, or property name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier<'src> {
    pub span: TokenSpan,
    pub name: &'src str,
}

/// A `#name` class member name. `name` excludes the `#`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateName<'src> {
    pub span: TokenSpan,
    pub name: &'src str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    Null,
    Boolean(bool),
    Numeric,
    BigInt,
    String,
    RegExp,
}

/// A literal token. `raw` is the token text; values are not decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal<'src> {
    pub span: TokenSpan,
    pub kind: LiteralKind,
    pub raw: &'src str,
}

impl<'src> Literal<'src> {
    /// Pattern and flags of a regular expression literal.
    pub fn regex_parts(&self) -> Option<(&'src str, &'src str)> {
        if self.kind != LiteralKind::RegExp {
            return None;
        }
        let close = self.raw.rfind('/')?;
        Some((&self.raw[1..close], &self.raw[close + 1..]))
    }
}

/// A template literal: `quasis.len() == expressions.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral<'src> {
    pub span: TokenSpan,
    pub quasis: Vec<TemplateElement<'src>>,
    pub expressions: Vec<Expression<'src>>,
}

/// One raw piece of a template, delimiters included in `raw`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement<'src> {
    pub span: TokenSpan,
    pub raw: &'src str,
    pub tail: bool,
}

impl<'src> TemplateElement<'src> {
    /// The raw text between the delimiters (`` ` ``/`}` and `` ` ``/`${`).
    pub fn text(&self) -> &'src str {
        let end = if self.tail { self.raw.len() - 1 } else { self.raw.len() - 2 };
        &self.raw[1..end.max(1)]
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement<'src> {
    Block(BlockStatement<'src>),
    Empty(TokenSpan),
    Expression(ExpressionStatement<'src>),
    If(Box<IfStatement<'src>>),
    DoWhile(Box<DoWhileStatement<'src>>),
    While(Box<WhileStatement<'src>>),
    For(Box<ForStatement<'src>>),
    ForIn(Box<ForInStatement<'src>>),
    ForOf(Box<ForOfStatement<'src>>),
    Continue(ContinueStatement<'src>),
    Break(BreakStatement<'src>),
    Return(ReturnStatement<'src>),
    With(Box<WithStatement<'src>>),
    Switch(Box<SwitchStatement<'src>>),
    Labeled(Box<LabeledStatement<'src>>),
    Throw(ThrowStatement<'src>),
    Try(Box<TryStatement<'src>>),
    Debugger(TokenSpan),
    Variable(VariableDeclaration<'src>),
    Function(Box<Function<'src>>),
    Class(Box<Class<'src>>),
    Import(Box<ImportDeclaration<'src>>),
    Export(Box<ExportDeclaration<'src>>),
    /// A TypeScript-only declaration, recognized and dropped.
    Erased(TokenSpan),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement<'src> {
    pub span: TokenSpan,
    pub body: Vec<Statement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement<'src> {
    pub span: TokenSpan,
    pub expression: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement<'src> {
    pub span: TokenSpan,
    pub test: Expression<'src>,
    pub consequent: Statement<'src>,
    pub alternate: Option<Statement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStatement<'src> {
    pub span: TokenSpan,
    pub body: Statement<'src>,
    pub test: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement<'src> {
    pub span: TokenSpan,
    pub test: Expression<'src>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement<'src> {
    pub span: TokenSpan,
    pub init: Option<ForInit<'src>>,
    pub test: Option<Expression<'src>>,
    pub update: Option<Expression<'src>>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInit<'src> {
    Variable(VariableDeclaration<'src>),
    Expression(Expression<'src>),
}

/// The left side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForHead<'src> {
    /// A declaration with exactly one declarator and no initializer.
    Variable(VariableDeclaration<'src>),
    Target(AssignmentTarget<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForInStatement<'src> {
    pub span: TokenSpan,
    pub left: ForHead<'src>,
    pub right: Expression<'src>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForOfStatement<'src> {
    pub span: TokenSpan,
    pub is_await: bool,
    pub left: ForHead<'src>,
    pub right: Expression<'src>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement<'src> {
    pub span: TokenSpan,
    pub label: Option<Identifier<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement<'src> {
    pub span: TokenSpan,
    pub label: Option<Identifier<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement<'src> {
    pub span: TokenSpan,
    pub argument: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithStatement<'src> {
    pub span: TokenSpan,
    pub object: Expression<'src>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement<'src> {
    pub span: TokenSpan,
    pub discriminant: Expression<'src>,
    pub cases: Vec<SwitchCase<'src>>,
}

/// A `case` clause, or the `default` clause when `test` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase<'src> {
    pub span: TokenSpan,
    pub test: Option<Expression<'src>>,
    pub consequent: Vec<Statement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledStatement<'src> {
    pub span: TokenSpan,
    pub label: Identifier<'src>,
    pub body: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement<'src> {
    pub span: TokenSpan,
    pub argument: Expression<'src>,
}

/// At least one of `handler` and `finalizer` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryStatement<'src> {
    pub span: TokenSpan,
    pub block: BlockStatement<'src>,
    pub handler: Option<CatchClause<'src>>,
    pub finalizer: Option<BlockStatement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause<'src> {
    pub span: TokenSpan,
    pub param: Option<BindingPattern<'src>>,
    pub body: BlockStatement<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration<'src> {
    pub span: TokenSpan,
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator<'src> {
    pub span: TokenSpan,
    pub id: BindingPattern<'src>,
    pub init: Option<Expression<'src>>,
}

// ============================================================================
// Functions and classes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function<'src> {
    pub span: TokenSpan,
    pub id: Option<Identifier<'src>>,
    pub is_async: bool,
    pub is_generator: bool,
    pub params: FormalParameters<'src>,
    pub body: FunctionBody<'src>,
}

/// A parenthesized parameter list, or the lone identifier of `x => …`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormalParameters<'src> {
    pub span: TokenSpan,
    pub items: Vec<BindingElement<'src>>,
    pub rest: Option<BindingRestElement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionBody<'src> {
    pub span: TokenSpan,
    pub statements: Vec<Statement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunction<'src> {
    pub span: TokenSpan,
    pub is_async: bool,
    pub params: FormalParameters<'src>,
    pub body: ArrowBody<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrowBody<'src> {
    Expression(Expression<'src>),
    Block(FunctionBody<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class<'src> {
    pub span: TokenSpan,
    pub id: Option<Identifier<'src>>,
    pub super_class: Option<Expression<'src>>,
    pub body: ClassBody<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBody<'src> {
    pub span: TokenSpan,
    pub elements: Vec<ClassElement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassElement<'src> {
    Method(Box<MethodDefinition<'src>>),
    Field(Box<FieldDefinition<'src>>),
    StaticBlock(StaticBlock<'src>),
    /// A stray `;` in the class body.
    Empty(TokenSpan),
    /// An index signature, overload, or abstract member, recognized and dropped.
    Erased(TokenSpan),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// A method in a class body or an object literal. `value.id` is always `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition<'src> {
    pub span: TokenSpan,
    pub key: PropertyKey<'src>,
    pub kind: MethodKind,
    pub is_static: bool,
    pub value: Function<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition<'src> {
    pub span: TokenSpan,
    pub key: PropertyKey<'src>,
    pub is_static: bool,
    pub value: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticBlock<'src> {
    pub span: TokenSpan,
    pub body: Vec<Statement<'src>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression<'src> {
    Identifier(Identifier<'src>),
    This(TokenSpan),
    /// `super`; only appears as a member object or a call callee.
    Super(TokenSpan),
    Literal(Literal<'src>),
    Array(Box<ArrayLiteral<'src>>),
    Object(Box<ObjectLiteral<'src>>),
    Function(Box<Function<'src>>),
    Class(Box<Class<'src>>),
    Arrow(Box<ArrowFunction<'src>>),
    Template(Box<TemplateLiteral<'src>>),
    TaggedTemplate(Box<TaggedTemplate<'src>>),
    Parenthesized(Box<ParenthesizedExpression<'src>>),
    Member(Box<MemberExpression<'src>>),
    Call(Box<CallExpression<'src>>),
    New(Box<NewExpression<'src>>),
    /// An optional chain `a?.b.c`, wrapping its outermost link.
    Chain(Box<ChainExpression<'src>>),
    MetaProperty(Box<MetaProperty<'src>>),
    ImportCall(Box<ImportCall<'src>>),
    Update(Box<UpdateExpression<'src>>),
    Unary(Box<UnaryExpression<'src>>),
    Await(Box<AwaitExpression<'src>>),
    Binary(Box<BinaryExpression<'src>>),
    /// `#x in obj`
    PrivateIn(Box<PrivateInExpression<'src>>),
    Conditional(Box<ConditionalExpression<'src>>),
    Assignment(Box<AssignmentExpression<'src>>),
    Yield(Box<YieldExpression<'src>>),
    Sequence(Box<SequenceExpression<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral<'src> {
    pub span: TokenSpan,
    pub elements: Vec<ArrayElement<'src>>,
    /// Whether the last element is followed by a comma.
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrayElement<'src> {
    Expression(Expression<'src>),
    Spread(SpreadElement<'src>),
    /// An elision; its comma belongs to the array.
    Hole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadElement<'src> {
    pub span: TokenSpan,
    pub argument: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteral<'src> {
    pub span: TokenSpan,
    pub properties: Vec<PropertyDefinition<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyDefinition<'src> {
    KeyValue(Box<KeyValueProperty<'src>>),
    Shorthand(Identifier<'src>),
    /// `{ a = 1 }`; only valid once the object converts to a pattern.
    CoverInitializedName(Box<CoverInitializedName<'src>>),
    Method(Box<MethodDefinition<'src>>),
    Spread(SpreadElement<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValueProperty<'src> {
    pub span: TokenSpan,
    pub key: PropertyKey<'src>,
    pub value: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverInitializedName<'src> {
    pub span: TokenSpan,
    pub name: Identifier<'src>,
    pub initializer: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyKey<'src> {
    /// Any `IdentifierName`, reserved words included.
    Identifier(Identifier<'src>),
    String(Literal<'src>),
    /// Numeric and bigint keys.
    Numeric(Literal<'src>),
    Computed(Box<ComputedKey<'src>>),
    Private(PrivateName<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedKey<'src> {
    pub span: TokenSpan,
    pub expression: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedTemplate<'src> {
    pub span: TokenSpan,
    pub tag: Expression<'src>,
    pub quasi: TemplateLiteral<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression<'src> {
    pub span: TokenSpan,
    pub expression: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MemberProperty<'src> {
    Identifier(Identifier<'src>),
    Private(PrivateName<'src>),
    Computed(Expression<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression<'src> {
    pub span: TokenSpan,
    pub object: Expression<'src>,
    pub property: MemberProperty<'src>,
    /// Whether this link was written with `?.`.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Argument<'src> {
    Expression(Expression<'src>),
    Spread(SpreadElement<'src>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression<'src> {
    pub span: TokenSpan,
    pub callee: Expression<'src>,
    pub arguments: Vec<Argument<'src>>,
    pub optional: bool,
}

/// `new C(…)`, or `new C` when `arguments` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpression<'src> {
    pub span: TokenSpan,
    pub callee: Expression<'src>,
    pub arguments: Option<Vec<Argument<'src>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainExpression<'src> {
    pub span: TokenSpan,
    pub expression: Expression<'src>,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaProperty<'src> {
    pub span: TokenSpan,
    pub meta: Identifier<'src>,
    pub property: Identifier<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportCall<'src> {
    pub span: TokenSpan,
    pub source: Expression<'src>,
    pub options: Option<Expression<'src>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpression<'src> {
    pub span: TokenSpan,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: SimpleAssignmentTarget<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Minus,
    Plus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression<'src> {
    pub span: TokenSpan,
    pub operator: UnaryOperator,
    pub argument: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwaitExpression<'src> {
    pub span: TokenSpan,
    pub argument: Expression<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,
    LessThan,
    LessEqualThan,
    GreaterThan,
    GreaterEqualThan,
    ShiftLeft,
    ShiftRight,
    ShiftRightZeroFill,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    Exponential,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    In,
    InstanceOf,
    LogicalOr,
    LogicalAnd,
    Coalesce,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "!=",
            BinaryOperator::StrictEquality => "===",
            BinaryOperator::StrictInequality => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessEqualThan => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterEqualThan => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::ShiftRightZeroFill => ">>>",
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponential => "**",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::Coalesce => "??",
        }
    }

    #[inline]
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd | BinaryOperator::Coalesce
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression<'src> {
    pub span: TokenSpan,
    pub left: Expression<'src>,
    pub operator: BinaryOperator,
    pub right: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateInExpression<'src> {
    pub span: TokenSpan,
    pub name: PrivateName<'src>,
    pub right: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression<'src> {
    pub span: TokenSpan,
    pub test: Expression<'src>,
    pub consequent: Expression<'src>,
    pub alternate: Expression<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    Assign,
    Addition,
    Subtraction,
    Multiplication,
    Exponential,
    Division,
    Remainder,
    ShiftLeft,
    ShiftRight,
    ShiftRightZeroFill,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalOr,
    LogicalAnd,
    Coalesce,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Addition => "+=",
            AssignmentOperator::Subtraction => "-=",
            AssignmentOperator::Multiplication => "*=",
            AssignmentOperator::Exponential => "**=",
            AssignmentOperator::Division => "/=",
            AssignmentOperator::Remainder => "%=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRight => ">>=",
            AssignmentOperator::ShiftRightZeroFill => ">>>=",
            AssignmentOperator::BitwiseAnd => "&=",
            AssignmentOperator::BitwiseOr => "|=",
            AssignmentOperator::BitwiseXor => "^=",
            AssignmentOperator::LogicalOr => "||=",
            AssignmentOperator::LogicalAnd => "&&=",
            AssignmentOperator::Coalesce => "??=",
        }
    }
}

/// `target op value`. Only `=` may have a pattern target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression<'src> {
    pub span: TokenSpan,
    pub operator: AssignmentOperator,
    pub target: AssignmentTarget<'src>,
    pub value: Expression<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldExpression<'src> {
    pub span: TokenSpan,
    pub delegate: bool,
    pub argument: Option<Expression<'src>>,
}

/// Two or more comma-separated expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression<'src> {
    pub span: TokenSpan,
    pub expressions: Vec<Expression<'src>>,
}

// ============================================================================
// Assignment targets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssignmentTarget<'src> {
    Simple(SimpleAssignmentTarget<'src>),
    Pattern(AssignmentPattern<'src>),
}

/// An identifier or a non-optional member access, possibly parenthesized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimpleAssignmentTarget<'src> {
    Identifier(Identifier<'src>),
    Member(Box<MemberExpression<'src>>),
    Parenthesized(Box<ParenthesizedTarget<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedTarget<'src> {
    pub span: TokenSpan,
    pub target: SimpleAssignmentTarget<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssignmentPattern<'src> {
    Object(Box<ObjectAssignmentPattern<'src>>),
    Array(Box<ArrayAssignmentPattern<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectAssignmentPattern<'src> {
    pub span: TokenSpan,
    pub properties: Vec<AssignmentProperty<'src>>,
    pub rest: Option<AssignmentRest<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssignmentProperty<'src> {
    Shorthand(AssignmentShorthand<'src>),
    KeyValue(Box<AssignmentKeyValue<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentShorthand<'src> {
    pub span: TokenSpan,
    pub name: Identifier<'src>,
    pub default: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentKeyValue<'src> {
    pub span: TokenSpan,
    pub key: PropertyKey<'src>,
    pub value: AssignmentElement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayAssignmentPattern<'src> {
    pub span: TokenSpan,
    /// `None` marks a hole.
    pub elements: Vec<Option<AssignmentElement<'src>>>,
    pub rest: Option<AssignmentRest<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentElement<'src> {
    pub span: TokenSpan,
    pub target: AssignmentTarget<'src>,
    pub default: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRest<'src> {
    pub span: TokenSpan,
    pub target: Box<AssignmentTarget<'src>>,
}

// ============================================================================
// Binding patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BindingPattern<'src> {
    Identifier(Identifier<'src>),
    Object(Box<ObjectPattern<'src>>),
    Array(Box<ArrayPattern<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPattern<'src> {
    pub span: TokenSpan,
    pub properties: Vec<BindingProperty<'src>>,
    pub rest: Option<BindingRestElement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BindingProperty<'src> {
    Shorthand(BindingShorthand<'src>),
    KeyValue(Box<BindingKeyValue<'src>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingShorthand<'src> {
    pub span: TokenSpan,
    pub name: Identifier<'src>,
    pub default: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingKeyValue<'src> {
    pub span: TokenSpan,
    pub key: PropertyKey<'src>,
    pub value: BindingElement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPattern<'src> {
    pub span: TokenSpan,
    /// `None` marks a hole.
    pub elements: Vec<Option<BindingElement<'src>>>,
    pub rest: Option<BindingRestElement<'src>>,
}

/// A binding target with an optional default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingElement<'src> {
    pub span: TokenSpan,
    pub pattern: BindingPattern<'src>,
    pub default: Option<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingRestElement<'src> {
    pub span: TokenSpan,
    pub argument: BindingPattern<'src>,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration<'src> {
    pub span: TokenSpan,
    /// Empty for a side-effect import `import "m";`.
    pub specifiers: Vec<ImportSpecifier<'src>>,
    pub source: Literal<'src>,
    pub attributes: Vec<ImportAttribute<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportSpecifier<'src> {
    Default(Identifier<'src>),
    Namespace(NamespaceSpecifier<'src>),
    Named(NamedImport<'src>),
}

/// `* as local`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceSpecifier<'src> {
    pub span: TokenSpan,
    pub local: Identifier<'src>,
}

/// `imported as local`, or a bare `local`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedImport<'src> {
    pub span: TokenSpan,
    pub imported: Option<ModuleExportName<'src>>,
    pub local: Identifier<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModuleExportName<'src> {
    Identifier(Identifier<'src>),
    String(Literal<'src>),
}

/// `key: "value"` inside `with { … }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportAttribute<'src> {
    pub span: TokenSpan,
    pub key: ModuleExportName<'src>,
    pub value: Literal<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportDeclaration<'src> {
    Named(ExportNamed<'src>),
    All(ExportAll<'src>),
    Declaration(ExportDecl<'src>),
    Default(ExportDefault<'src>),
}

/// `export { a, b as c }` with an optional `from "m"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNamed<'src> {
    pub span: TokenSpan,
    pub specifiers: Vec<ExportSpecifier<'src>>,
    pub source: Option<Literal<'src>>,
    pub attributes: Vec<ImportAttribute<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier<'src> {
    pub span: TokenSpan,
    pub local: ModuleExportName<'src>,
    pub exported: Option<ModuleExportName<'src>>,
}

/// `export * from "m"` or `export * as ns from "m"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAll<'src> {
    pub span: TokenSpan,
    pub exported: Option<ModuleExportName<'src>>,
    pub source: Literal<'src>,
    pub attributes: Vec<ImportAttribute<'src>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDecl<'src> {
    pub span: TokenSpan,
    pub declaration: Statement<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDefault<'src> {
    pub span: TokenSpan,
    pub value: ExportDefaultValue<'src>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportDefaultValue<'src> {
    Function(Box<Function<'src>>),
    Class(Box<Class<'src>>),
    Expression(Expression<'src>),
}

// ============================================================================
// Span access
// ============================================================================

impl_spanned!(
    Program,
    Identifier,
    PrivateName,
    Literal,
    TemplateLiteral,
    TemplateElement,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    DoWhileStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    SwitchCase,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    VariableDeclaration,
    VariableDeclarator,
    Function,
    FormalParameters,
    FunctionBody,
    ArrowFunction,
    Class,
    ClassBody,
    MethodDefinition,
    FieldDefinition,
    StaticBlock,
    ArrayLiteral,
    SpreadElement,
    ObjectLiteral,
    KeyValueProperty,
    CoverInitializedName,
    ComputedKey,
    TaggedTemplate,
    ParenthesizedExpression,
    MemberExpression,
    CallExpression,
    NewExpression,
    ChainExpression,
    MetaProperty,
    ImportCall,
    UpdateExpression,
    UnaryExpression,
    AwaitExpression,
    BinaryExpression,
    PrivateInExpression,
    ConditionalExpression,
    AssignmentExpression,
    YieldExpression,
    SequenceExpression,
    ParenthesizedTarget,
    ObjectAssignmentPattern,
    AssignmentShorthand,
    AssignmentKeyValue,
    ArrayAssignmentPattern,
    AssignmentElement,
    AssignmentRest,
    ObjectPattern,
    BindingShorthand,
    BindingKeyValue,
    ArrayPattern,
    BindingElement,
    BindingRestElement,
    ImportDeclaration,
    NamespaceSpecifier,
    NamedImport,
    ImportAttribute,
    ExportNamed,
    ExportSpecifier,
    ExportAll,
    ExportDecl,
    ExportDefault,
);

impl<'src> Spanned for Statement<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            Statement::Block(n) => n.span,
            Statement::Empty(span) | Statement::Debugger(span) | Statement::Erased(span) => *span,
            Statement::Expression(n) => n.span,
            Statement::If(n) => n.span,
            Statement::DoWhile(n) => n.span,
            Statement::While(n) => n.span,
            Statement::For(n) => n.span,
            Statement::ForIn(n) => n.span,
            Statement::ForOf(n) => n.span,
            Statement::Continue(n) => n.span,
            Statement::Break(n) => n.span,
            Statement::Return(n) => n.span,
            Statement::With(n) => n.span,
            Statement::Switch(n) => n.span,
            Statement::Labeled(n) => n.span,
            Statement::Throw(n) => n.span,
            Statement::Try(n) => n.span,
            Statement::Variable(n) => n.span,
            Statement::Function(n) => n.span,
            Statement::Class(n) => n.span,
            Statement::Import(n) => n.span,
            Statement::Export(n) => n.span(),
        }
    }
}

impl<'src> Spanned for Expression<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            Expression::Identifier(n) => n.span,
            Expression::This(span) | Expression::Super(span) => *span,
            Expression::Literal(n) => n.span,
            Expression::Array(n) => n.span,
            Expression::Object(n) => n.span,
            Expression::Function(n) => n.span,
            Expression::Class(n) => n.span,
            Expression::Arrow(n) => n.span,
            Expression::Template(n) => n.span,
            Expression::TaggedTemplate(n) => n.span,
            Expression::Parenthesized(n) => n.span,
            Expression::Member(n) => n.span,
            Expression::Call(n) => n.span,
            Expression::New(n) => n.span,
            Expression::Chain(n) => n.span,
            Expression::MetaProperty(n) => n.span,
            Expression::ImportCall(n) => n.span,
            Expression::Update(n) => n.span,
            Expression::Unary(n) => n.span,
            Expression::Await(n) => n.span,
            Expression::Binary(n) => n.span,
            Expression::PrivateIn(n) => n.span,
            Expression::Conditional(n) => n.span,
            Expression::Assignment(n) => n.span,
            Expression::Yield(n) => n.span,
            Expression::Sequence(n) => n.span,
        }
    }
}

impl<'src> Spanned for ForInit<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ForInit::Variable(n) => n.span,
            ForInit::Expression(n) => n.span(),
        }
    }
}

impl<'src> Spanned for ForHead<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ForHead::Variable(n) => n.span,
            ForHead::Target(n) => n.span(),
        }
    }
}

impl<'src> Spanned for ArrowBody<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ArrowBody::Expression(n) => n.span(),
            ArrowBody::Block(n) => n.span,
        }
    }
}

impl<'src> Spanned for ClassElement<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ClassElement::Method(n) => n.span,
            ClassElement::Field(n) => n.span,
            ClassElement::StaticBlock(n) => n.span,
            ClassElement::Empty(span) | ClassElement::Erased(span) => *span,
        }
    }
}

impl<'src> Spanned for PropertyDefinition<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            PropertyDefinition::KeyValue(n) => n.span,
            PropertyDefinition::Shorthand(n) => n.span,
            PropertyDefinition::CoverInitializedName(n) => n.span,
            PropertyDefinition::Method(n) => n.span,
            PropertyDefinition::Spread(n) => n.span,
        }
    }
}

impl<'src> Spanned for PropertyKey<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            PropertyKey::Identifier(n) => n.span,
            PropertyKey::String(n) | PropertyKey::Numeric(n) => n.span,
            PropertyKey::Computed(n) => n.span,
            PropertyKey::Private(n) => n.span,
        }
    }
}

impl<'src> Spanned for Argument<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            Argument::Expression(n) => n.span(),
            Argument::Spread(n) => n.span,
        }
    }
}

impl<'src> Spanned for AssignmentTarget<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            AssignmentTarget::Simple(n) => n.span(),
            AssignmentTarget::Pattern(n) => n.span(),
        }
    }
}

impl<'src> Spanned for SimpleAssignmentTarget<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            SimpleAssignmentTarget::Identifier(n) => n.span,
            SimpleAssignmentTarget::Member(n) => n.span,
            SimpleAssignmentTarget::Parenthesized(n) => n.span,
        }
    }
}

impl<'src> Spanned for AssignmentPattern<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            AssignmentPattern::Object(n) => n.span,
            AssignmentPattern::Array(n) => n.span,
        }
    }
}

impl<'src> Spanned for AssignmentProperty<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            AssignmentProperty::Shorthand(n) => n.span,
            AssignmentProperty::KeyValue(n) => n.span,
        }
    }
}

impl<'src> Spanned for BindingPattern<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            BindingPattern::Identifier(n) => n.span,
            BindingPattern::Object(n) => n.span,
            BindingPattern::Array(n) => n.span,
        }
    }
}

impl<'src> Spanned for BindingProperty<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            BindingProperty::Shorthand(n) => n.span,
            BindingProperty::KeyValue(n) => n.span,
        }
    }
}

impl<'src> Spanned for ImportSpecifier<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ImportSpecifier::Default(n) => n.span,
            ImportSpecifier::Namespace(n) => n.span,
            ImportSpecifier::Named(n) => n.span,
        }
    }
}

impl<'src> Spanned for ModuleExportName<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ModuleExportName::Identifier(n) => n.span,
            ModuleExportName::String(n) => n.span,
        }
    }
}

impl<'src> Spanned for ExportDeclaration<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ExportDeclaration::Named(n) => n.span,
            ExportDeclaration::All(n) => n.span,
            ExportDeclaration::Declaration(n) => n.span,
            ExportDeclaration::Default(n) => n.span,
        }
    }
}

impl<'src> Spanned for ExportDefaultValue<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            ExportDefaultValue::Function(n) => n.span,
            ExportDefaultValue::Class(n) => n.span,
            ExportDefaultValue::Expression(n) => n.span(),
        }
    }
}

impl<'src> Spanned for MemberProperty<'src> {
    fn span(&self) -> TokenSpan {
        match self {
            MemberProperty::Identifier(n) => n.span,
            MemberProperty::Private(n) => n.span,
            MemberProperty::Computed(n) => n.span(),
        }
    }
}
