//! TokenKind enum - all token kinds produced by the ECMAScript scanner.
//!
//! Kinds are grouped into contiguous discriminant ranges (trivia, literals,
//! punctuation, assignments, keywords) so classification is a range check.

use serde::Serialize;

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Synthetic
    // ========================================================================
    EndOfInput = 0,

    // Trivia
    Whitespace = 1,
    LineTerminator = 2,
    SingleLineComment = 3,
    MultiLineComment = 4,
    Hashbang = 5,

    // Literals
    NumericLiteral = 6,
    BigIntLiteral = 7,
    StringLiteral = 8,
    RegularExpressionLiteral = 9,
    NoSubstitutionTemplate = 10,

    // Template pieces
    TemplateHead = 11,
    TemplateMiddle = 12,
    TemplateTail = 13,

    // Names
    Identifier = 14,
    PrivateName = 15,

    // Punctuation
    OpenBraceToken = 16,
    CloseBraceToken = 17,
    OpenParenToken = 18,
    CloseParenToken = 19,
    OpenBracketToken = 20,
    CloseBracketToken = 21,
    DotToken = 22,
    DotDotDotToken = 23,
    SemicolonToken = 24,
    CommaToken = 25,
    QuestionDotToken = 26,
    LessThanToken = 27,
    /// Always a single `>`; `>=`, `>>`, `>>>` are recombined by the parser.
    GreaterThanToken = 28,
    LessThanEqualsToken = 29,
    EqualsEqualsToken = 30,
    ExclamationEqualsToken = 31,
    EqualsEqualsEqualsToken = 32,
    ExclamationEqualsEqualsToken = 33,
    EqualsGreaterThanToken = 34,
    PlusToken = 35,
    MinusToken = 36,
    AsteriskToken = 37,
    AsteriskAsteriskToken = 38,
    SlashToken = 39,
    PercentToken = 40,
    PlusPlusToken = 41,
    MinusMinusToken = 42,
    LessThanLessThanToken = 43,
    AmpersandToken = 44,
    BarToken = 45,
    CaretToken = 46,
    ExclamationToken = 47,
    TildeToken = 48,
    AmpersandAmpersandToken = 49,
    BarBarToken = 50,
    QuestionToken = 51,
    QuestionQuestionToken = 52,
    ColonToken = 53,
    AtToken = 54,

    // Assignments
    EqualsToken = 55,
    PlusEqualsToken = 56,
    MinusEqualsToken = 57,
    AsteriskEqualsToken = 58,
    AsteriskAsteriskEqualsToken = 59,
    SlashEqualsToken = 60,
    PercentEqualsToken = 61,
    LessThanLessThanEqualsToken = 62,
    AmpersandEqualsToken = 63,
    BarEqualsToken = 64,
    CaretEqualsToken = 65,
    BarBarEqualsToken = 66,
    AmpersandAmpersandEqualsToken = 67,
    QuestionQuestionEqualsToken = 68,

    // Reserved words
    BreakKeyword = 69,
    CaseKeyword = 70,
    CatchKeyword = 71,
    ClassKeyword = 72,
    ConstKeyword = 73,
    ContinueKeyword = 74,
    DebuggerKeyword = 75,
    DefaultKeyword = 76,
    DeleteKeyword = 77,
    DoKeyword = 78,
    ElseKeyword = 79,
    ExportKeyword = 80,
    ExtendsKeyword = 81,
    FinallyKeyword = 82,
    ForKeyword = 83,
    FunctionKeyword = 84,
    IfKeyword = 85,
    ImportKeyword = 86,
    InKeyword = 87,
    InstanceOfKeyword = 88,
    NewKeyword = 89,
    ReturnKeyword = 90,
    SuperKeyword = 91,
    SwitchKeyword = 92,
    ThisKeyword = 93,
    ThrowKeyword = 94,
    TryKeyword = 95,
    TypeOfKeyword = 96,
    VarKeyword = 97,
    VoidKeyword = 98,
    WhileKeyword = 99,
    WithKeyword = 100,

    // Future reserved word
    EnumKeyword = 101,

    // Literal words
    NullKeyword = 102,
    TrueKeyword = 103,
    FalseKeyword = 104,
}

impl TokenKind {
    /// Whether this kind is trivia (whitespace, line terminators, comments).
    #[inline]
    pub fn is_trivia(self) -> bool {
        let v = self as u8;
        v >= TokenKind::Whitespace as u8 && v <= TokenKind::Hashbang as u8
    }

    /// Whether this kind is a reserved word, future reserved word, or literal word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= TokenKind::BreakKeyword as u8 && v <= TokenKind::FalseKeyword as u8
    }

    /// Whether this kind is valid as an `IdentifierName` (property names,
    /// member access after `.`, export names).
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self == TokenKind::Identifier || self.is_keyword()
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u8;
        v >= TokenKind::OpenBraceToken as u8 && v <= TokenKind::QuestionQuestionEqualsToken as u8
    }

    /// Whether this kind represents a literal token (templates included).
    #[inline]
    pub fn is_literal(self) -> bool {
        let v = self as u8;
        v >= TokenKind::NumericLiteral as u8 && v <= TokenKind::TemplateTail as u8
    }

    /// Whether this kind is one of the template pieces.
    #[inline]
    pub fn is_template(self) -> bool {
        let v = self as u8;
        v >= TokenKind::NoSubstitutionTemplate as u8 && v <= TokenKind::TemplateTail as u8
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u8;
        v >= TokenKind::EqualsToken as u8 && v <= TokenKind::QuestionQuestionEqualsToken as u8
    }

    /// Whether a token of this kind can end an expression, which makes a
    /// following `/` a division operator rather than the start of a regex.
    ///
    /// `)` is decided by the scanner's bracket stack and `++`/`--` keep the
    /// previous state, so both are excluded here.
    #[inline]
    pub fn ends_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::PrivateName
                | TokenKind::NumericLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::StringLiteral
                | TokenKind::RegularExpressionLiteral
                | TokenKind::NoSubstitutionTemplate
                | TokenKind::TemplateTail
                | TokenKind::CloseBracketToken
                | TokenKind::ThisKeyword
                | TokenKind::SuperKeyword
                | TokenKind::NullKeyword
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
        )
    }

    /// Get the keyword text for a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::BreakKeyword => Some("break"),
            TokenKind::CaseKeyword => Some("case"),
            TokenKind::CatchKeyword => Some("catch"),
            TokenKind::ClassKeyword => Some("class"),
            TokenKind::ConstKeyword => Some("const"),
            TokenKind::ContinueKeyword => Some("continue"),
            TokenKind::DebuggerKeyword => Some("debugger"),
            TokenKind::DefaultKeyword => Some("default"),
            TokenKind::DeleteKeyword => Some("delete"),
            TokenKind::DoKeyword => Some("do"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::ExportKeyword => Some("export"),
            TokenKind::ExtendsKeyword => Some("extends"),
            TokenKind::FinallyKeyword => Some("finally"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::FunctionKeyword => Some("function"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ImportKeyword => Some("import"),
            TokenKind::InKeyword => Some("in"),
            TokenKind::InstanceOfKeyword => Some("instanceof"),
            TokenKind::NewKeyword => Some("new"),
            TokenKind::ReturnKeyword => Some("return"),
            TokenKind::SuperKeyword => Some("super"),
            TokenKind::SwitchKeyword => Some("switch"),
            TokenKind::ThisKeyword => Some("this"),
            TokenKind::ThrowKeyword => Some("throw"),
            TokenKind::TryKeyword => Some("try"),
            TokenKind::TypeOfKeyword => Some("typeof"),
            TokenKind::VarKeyword => Some("var"),
            TokenKind::VoidKeyword => Some("void"),
            TokenKind::WhileKeyword => Some("while"),
            TokenKind::WithKeyword => Some("with"),
            TokenKind::EnumKeyword => Some("enum"),
            TokenKind::NullKeyword => Some("null"),
            TokenKind::TrueKeyword => Some("true"),
            TokenKind::FalseKeyword => Some("false"),
            _ => None,
        }
    }

    /// Look up a keyword TokenKind from identifier text.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "break" => Some(TokenKind::BreakKeyword),
            "case" => Some(TokenKind::CaseKeyword),
            "catch" => Some(TokenKind::CatchKeyword),
            "class" => Some(TokenKind::ClassKeyword),
            "const" => Some(TokenKind::ConstKeyword),
            "continue" => Some(TokenKind::ContinueKeyword),
            "debugger" => Some(TokenKind::DebuggerKeyword),
            "default" => Some(TokenKind::DefaultKeyword),
            "delete" => Some(TokenKind::DeleteKeyword),
            "do" => Some(TokenKind::DoKeyword),
            "else" => Some(TokenKind::ElseKeyword),
            "export" => Some(TokenKind::ExportKeyword),
            "extends" => Some(TokenKind::ExtendsKeyword),
            "finally" => Some(TokenKind::FinallyKeyword),
            "for" => Some(TokenKind::ForKeyword),
            "function" => Some(TokenKind::FunctionKeyword),
            "if" => Some(TokenKind::IfKeyword),
            "import" => Some(TokenKind::ImportKeyword),
            "in" => Some(TokenKind::InKeyword),
            "instanceof" => Some(TokenKind::InstanceOfKeyword),
            "new" => Some(TokenKind::NewKeyword),
            "return" => Some(TokenKind::ReturnKeyword),
            "super" => Some(TokenKind::SuperKeyword),
            "switch" => Some(TokenKind::SwitchKeyword),
            "this" => Some(TokenKind::ThisKeyword),
            "throw" => Some(TokenKind::ThrowKeyword),
            "try" => Some(TokenKind::TryKeyword),
            "typeof" => Some(TokenKind::TypeOfKeyword),
            "var" => Some(TokenKind::VarKeyword),
            "void" => Some(TokenKind::VoidKeyword),
            "while" => Some(TokenKind::WhileKeyword),
            "with" => Some(TokenKind::WithKeyword),
            "enum" => Some(TokenKind::EnumKeyword),
            "null" => Some(TokenKind::NullKeyword),
            "true" => Some(TokenKind::TrueKeyword),
            "false" => Some(TokenKind::FalseKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::OpenBraceToken => Some("{"),
            TokenKind::CloseBraceToken => Some("}"),
            TokenKind::OpenParenToken => Some("("),
            TokenKind::CloseParenToken => Some(")"),
            TokenKind::OpenBracketToken => Some("["),
            TokenKind::CloseBracketToken => Some("]"),
            TokenKind::DotToken => Some("."),
            TokenKind::DotDotDotToken => Some("..."),
            TokenKind::SemicolonToken => Some(";"),
            TokenKind::CommaToken => Some(","),
            TokenKind::QuestionDotToken => Some("?."),
            TokenKind::LessThanToken => Some("<"),
            TokenKind::GreaterThanToken => Some(">"),
            TokenKind::LessThanEqualsToken => Some("<="),
            TokenKind::EqualsEqualsToken => Some("=="),
            TokenKind::ExclamationEqualsToken => Some("!="),
            TokenKind::EqualsEqualsEqualsToken => Some("==="),
            TokenKind::ExclamationEqualsEqualsToken => Some("!=="),
            TokenKind::EqualsGreaterThanToken => Some("=>"),
            TokenKind::PlusToken => Some("+"),
            TokenKind::MinusToken => Some("-"),
            TokenKind::AsteriskToken => Some("*"),
            TokenKind::AsteriskAsteriskToken => Some("**"),
            TokenKind::SlashToken => Some("/"),
            TokenKind::PercentToken => Some("%"),
            TokenKind::PlusPlusToken => Some("++"),
            TokenKind::MinusMinusToken => Some("--"),
            TokenKind::LessThanLessThanToken => Some("<<"),
            TokenKind::AmpersandToken => Some("&"),
            TokenKind::BarToken => Some("|"),
            TokenKind::CaretToken => Some("^"),
            TokenKind::ExclamationToken => Some("!"),
            TokenKind::TildeToken => Some("~"),
            TokenKind::AmpersandAmpersandToken => Some("&&"),
            TokenKind::BarBarToken => Some("||"),
            TokenKind::QuestionToken => Some("?"),
            TokenKind::QuestionQuestionToken => Some("??"),
            TokenKind::ColonToken => Some(":"),
            TokenKind::AtToken => Some("@"),
            TokenKind::EqualsToken => Some("="),
            TokenKind::PlusEqualsToken => Some("+="),
            TokenKind::MinusEqualsToken => Some("-="),
            TokenKind::AsteriskEqualsToken => Some("*="),
            TokenKind::AsteriskAsteriskEqualsToken => Some("**="),
            TokenKind::SlashEqualsToken => Some("/="),
            TokenKind::PercentEqualsToken => Some("%="),
            TokenKind::LessThanLessThanEqualsToken => Some("<<="),
            TokenKind::AmpersandEqualsToken => Some("&="),
            TokenKind::BarEqualsToken => Some("|="),
            TokenKind::CaretEqualsToken => Some("^="),
            TokenKind::BarBarEqualsToken => Some("||="),
            TokenKind::AmpersandAmpersandEqualsToken => Some("&&="),
            TokenKind::QuestionQuestionEqualsToken => Some("??="),
            _ => None,
        }
    }

    /// A short human-readable description, used in "expected …" messages.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.punctuation_text().or_else(|| self.keyword_text()) {
            return text;
        }
        match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineTerminator => "line terminator",
            TokenKind::SingleLineComment | TokenKind::MultiLineComment | TokenKind::Hashbang => {
                "comment"
            }
            TokenKind::NumericLiteral => "number",
            TokenKind::BigIntLiteral => "bigint",
            TokenKind::StringLiteral => "string",
            TokenKind::RegularExpressionLiteral => "regular expression",
            TokenKind::NoSubstitutionTemplate
            | TokenKind::TemplateHead
            | TokenKind::TemplateMiddle
            | TokenKind::TemplateTail => "template",
            TokenKind::Identifier => "identifier",
            TokenKind::PrivateName => "private name",
            _ => "token",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kind in [
            TokenKind::IfKeyword,
            TokenKind::InstanceOfKeyword,
            TokenKind::EnumKeyword,
            TokenKind::FalseKeyword,
        ] {
            let text = kind.keyword_text().unwrap();
            assert_eq!(TokenKind::from_keyword(text), Some(kind));
        }
        assert_eq!(TokenKind::from_keyword("let"), None);
        assert_eq!(TokenKind::from_keyword("async"), None);
    }

    #[test]
    fn test_ranges() {
        assert!(TokenKind::MultiLineComment.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
        assert!(TokenKind::WithKeyword.is_keyword());
        assert!(TokenKind::NullKeyword.is_identifier_name());
        assert!(TokenKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!TokenKind::EqualsEqualsToken.is_assignment_operator());
        assert!(TokenKind::TemplateMiddle.is_template());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::SemicolonToken.describe(), ";");
        assert_eq!(TokenKind::Identifier.describe(), "identifier");
        assert_eq!(TokenKind::EndOfInput.describe(), "end of input");
    }
}
