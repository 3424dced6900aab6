//! The ECMAScript scanner.
//!
//! Converts source text into raw tokens, trivia included, one per call to
//! [`Scanner::scan`]. Two pieces of state make it context sensitive:
//!
//! - a division-allowed flag, updated after every significant token, that
//!   decides whether `/` is an operator or the start of a regex literal;
//! - a bracket stack recording what each open `(`, `[`, `{` or `${` opened,
//!   so a `}` either closes a block or resumes the enclosing template.

use crate::char_codes::*;
use rsecma_ast::TokenKind;
use rsecma_diagnostics::LexicalErrorKind;
use smallvec::SmallVec;

/// A lexical error at a byte offset. The annotator turns the offset into a
/// full position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub kind: LexicalErrorKind,
    pub offset: usize,
}

/// What an entry on the bracket stack was opened by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    /// `(`; `control` when it opens an `if`/`while`/`for`/`with` head.
    Paren { control: bool },
    Square,
    /// `{`; `expression` when it opens an object literal.
    Brace { expression: bool },
    /// `${` inside a template.
    Template,
}

/// Whether a `{` after `prev` starts an object literal rather than a block
/// or function body. After `:` and `)` it is read as a block. The same test
/// tells a function or class expression from a declaration.
fn opens_object_literal(prev: TokenKind) -> bool {
    match prev {
        TokenKind::SemicolonToken
        | TokenKind::OpenBraceToken
        | TokenKind::CloseBraceToken
        | TokenKind::PlusPlusToken
        | TokenKind::MinusMinusToken
        | TokenKind::CloseParenToken
        | TokenKind::ColonToken
        | TokenKind::DotToken
        | TokenKind::QuestionDotToken
        | TokenKind::EqualsGreaterThanToken => false,
        TokenKind::TemplateHead
        | TokenKind::TemplateMiddle
        | TokenKind::ReturnKeyword
        | TokenKind::TypeOfKeyword
        | TokenKind::VoidKeyword
        | TokenKind::DeleteKeyword
        | TokenKind::InKeyword
        | TokenKind::InstanceOfKeyword
        | TokenKind::ThrowKeyword => true,
        other => other.is_punctuation(),
    }
}

impl Bracket {
    fn opener(self) -> char {
        match self {
            Bracket::Paren { .. } => '(',
            Bracket::Square => '[',
            Bracket::Brace { .. } => '{',
            Bracket::Template => '`',
        }
    }
}

type ScanResult = Result<TokenKind, ScanError>;

/// The scanner converts ECMAScript source text into tokens.
pub struct Scanner<'src> {
    text: &'src str,
    bytes: &'src [u8],
    /// Current position in the text.
    pos: usize,
    /// Start of the current token.
    token_start: usize,
    /// The current token kind.
    token: TokenKind,
    /// Whether a `/` at this point is a division operator.
    division_allowed: bool,
    /// The last significant token.
    prev: TokenKind,
    /// Set while scanning a `)` that closed a control-statement head.
    closed_control: bool,
    /// Set while scanning a `}` that closed an object literal.
    closed_expression: bool,
    /// Bracket depth whose next `{` opens a function or class expression body.
    expression_body: Option<usize>,
    brackets: SmallVec<[Bracket; 16]>,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            token_start: 0,
            token: TokenKind::EndOfInput,
            division_allowed: false,
            prev: TokenKind::EndOfInput,
            closed_control: false,
            closed_expression: false,
            expression_body: None,
            brackets: SmallVec::new(),
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// Get the byte offset where the current token starts.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the byte offset just past the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the raw text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'src str {
        &self.text[self.token_start..self.pos]
    }

    /// Whether a `/` scanned next would be a division operator.
    #[inline]
    pub fn division_allowed(&self) -> bool {
        self.division_allowed
    }

    /// Number of currently open brackets and template substitutions.
    #[inline]
    pub fn depth(&self) -> usize {
        self.brackets.len()
    }

    /// Scan the next token and return its kind. At end of input this returns
    /// `EndOfInput`, or an error if a bracket or template is still open.
    pub fn scan(&mut self) -> ScanResult {
        self.token_start = self.pos;
        self.closed_control = false;
        self.closed_expression = false;
        let kind = self.scan_token()?;
        self.token = kind;
        if !kind.is_trivia() {
            self.division_allowed = match kind {
                TokenKind::PlusPlusToken | TokenKind::MinusMinusToken => self.division_allowed,
                TokenKind::CloseParenToken => !self.closed_control,
                TokenKind::CloseBraceToken => self.closed_expression,
                // A property name after `.`, reserved word or not.
                other if other.is_keyword()
                    && matches!(self.prev, TokenKind::DotToken | TokenKind::QuestionDotToken) =>
                {
                    true
                }
                other => other.ends_expression(),
            };
            if matches!(kind, TokenKind::FunctionKeyword | TokenKind::ClassKeyword)
                && opens_object_literal(self.prev)
            {
                self.expression_body = Some(self.brackets.len());
            }
            self.prev = kind;
        }
        Ok(kind)
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// The character after an ASCII byte at `pos + offset - 1`.
    #[inline]
    fn char_after(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..)?.chars().next()
    }

    #[inline]
    fn punct(&mut self, len: usize, kind: TokenKind) -> ScanResult {
        self.pos += len;
        Ok(kind)
    }

    #[inline]
    fn error(&self, kind: LexicalErrorKind, offset: usize) -> ScanError {
        ScanError { kind, offset }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    fn scan_token(&mut self) -> ScanResult {
        let Some(ch) = self.current_char() else {
            return self.finish();
        };
        match ch {
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => self.punct(ch.len_utf8(), TokenKind::LineTerminator),
            '\r' => {
                let len = if self.peek_byte(1) == Some(b'\n') { 2 } else { 1 };
                self.punct(len, TokenKind::LineTerminator)
            }
            c if is_white_space_single_line(c) => self.scan_whitespace(),

            '#' if self.pos == 0 && self.peek_byte(1) == Some(b'!') => {
                self.pos = self.find_line_end(2);
                Ok(TokenKind::Hashbang)
            }
            '#' => self.scan_private_name(),

            '/' => match self.peek_byte(1) {
                Some(b'/') => {
                    self.pos = self.find_line_end(self.pos + 2);
                    Ok(TokenKind::SingleLineComment)
                }
                Some(b'*') => self.scan_multi_line_comment(),
                _ if !self.division_allowed => self.scan_regex(),
                Some(b'=') => self.punct(2, TokenKind::SlashEqualsToken),
                _ => self.punct(1, TokenKind::SlashToken),
            },

            '(' => {
                let control = matches!(
                    self.prev,
                    TokenKind::IfKeyword
                        | TokenKind::WhileKeyword
                        | TokenKind::ForKeyword
                        | TokenKind::WithKeyword
                );
                self.brackets.push(Bracket::Paren { control });
                self.punct(1, TokenKind::OpenParenToken)
            }
            ')' => match self.brackets.pop() {
                Some(Bracket::Paren { control }) => {
                    self.closed_control = control;
                    self.punct(1, TokenKind::CloseParenToken)
                }
                _ => Err(self.error(LexicalErrorKind::MismatchedBracket(')'), self.pos)),
            },
            '[' => {
                self.brackets.push(Bracket::Square);
                self.punct(1, TokenKind::OpenBracketToken)
            }
            ']' => match self.brackets.pop() {
                Some(Bracket::Square) => self.punct(1, TokenKind::CloseBracketToken),
                _ => Err(self.error(LexicalErrorKind::MismatchedBracket(']'), self.pos)),
            },
            '{' => {
                let body = self.expression_body == Some(self.brackets.len());
                if body {
                    self.expression_body = None;
                }
                let expression = body || opens_object_literal(self.prev);
                self.brackets.push(Bracket::Brace { expression });
                self.punct(1, TokenKind::OpenBraceToken)
            }
            '}' => match self.brackets.pop() {
                Some(Bracket::Brace { expression }) => {
                    self.closed_expression = expression;
                    self.punct(1, TokenKind::CloseBraceToken)
                }
                Some(Bracket::Template) => self.scan_template(false),
                _ => Err(self.error(LexicalErrorKind::MismatchedBracket('}'), self.pos)),
            },

            '`' => self.scan_template(true),
            '\'' | '"' => self.scan_string(ch as u8),
            '0'..='9' => self.scan_number(),

            '.' => match self.peek_byte(1) {
                Some(b'0'..=b'9') => self.scan_number(),
                Some(b'.') if self.peek_byte(2) == Some(b'.') => self.punct(3, TokenKind::DotDotDotToken),
                _ => self.punct(1, TokenKind::DotToken),
            },
            ';' => self.punct(1, TokenKind::SemicolonToken),
            ',' => self.punct(1, TokenKind::CommaToken),
            ':' => self.punct(1, TokenKind::ColonToken),
            '~' => self.punct(1, TokenKind::TildeToken),
            '@' => self.punct(1, TokenKind::AtToken),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            // Never combined here: the parser reassembles `>=`, `>>`, `>>>`.
            '>' => self.punct(1, TokenKind::GreaterThanToken),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_repeatable(b'+', TokenKind::PlusToken, TokenKind::PlusPlusToken, TokenKind::PlusEqualsToken),
            '-' => self.scan_repeatable(b'-', TokenKind::MinusToken, TokenKind::MinusMinusToken, TokenKind::MinusEqualsToken),
            '*' => self.scan_asterisk(),
            '%' => self.scan_compound(TokenKind::PercentToken, TokenKind::PercentEqualsToken),
            '^' => self.scan_compound(TokenKind::CaretToken, TokenKind::CaretEqualsToken),
            '&' => self.scan_logical(
                b'&',
                TokenKind::AmpersandToken,
                TokenKind::AmpersandEqualsToken,
                TokenKind::AmpersandAmpersandToken,
                TokenKind::AmpersandAmpersandEqualsToken,
            ),
            '|' => self.scan_logical(
                b'|',
                TokenKind::BarToken,
                TokenKind::BarEqualsToken,
                TokenKind::BarBarToken,
                TokenKind::BarBarEqualsToken,
            ),

            '\\' => self.scan_identifier(),
            c if is_identifier_start(c) => self.scan_identifier(),

            c => Err(self.error(LexicalErrorKind::UnexpectedCharacter(c), self.pos)),
        }
    }

    fn finish(&mut self) -> ScanResult {
        match self.brackets.last() {
            None => Ok(TokenKind::EndOfInput),
            Some(Bracket::Template) => {
                Err(self.error(LexicalErrorKind::UnterminatedTemplate, self.text.len()))
            }
            Some(open) => Err(self.error(
                LexicalErrorKind::UnclosedBracket(open.opener()),
                self.text.len(),
            )),
        }
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn scan_whitespace(&mut self) -> ScanResult {
        while let Some(ch) = self.current_char() {
            if !is_white_space_single_line(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        Ok(TokenKind::Whitespace)
    }

    /// Offset of the first line terminator at or after `from`, or the end of
    /// the text. U+2028 and U+2029 both encode with a leading 0xE2 byte.
    fn find_line_end(&self, from: usize) -> usize {
        let mut at = from;
        while let Some(i) = memchr::memchr3(b'\n', b'\r', 0xE2, &self.bytes[at..]) {
            let idx = at + i;
            if self.bytes[idx] != 0xE2 {
                return idx;
            }
            if matches!(self.bytes.get(idx + 1..idx + 3), Some([0x80, 0xA8]) | Some([0x80, 0xA9])) {
                return idx;
            }
            at = idx + 1;
        }
        self.bytes.len()
    }

    fn scan_multi_line_comment(&mut self) -> ScanResult {
        let mut at = self.pos + 2;
        loop {
            match memchr::memchr(b'*', &self.bytes[at..]) {
                Some(i) => {
                    let star = at + i;
                    if self.bytes.get(star + 1) == Some(&b'/') {
                        self.pos = star + 2;
                        return Ok(TokenKind::MultiLineComment);
                    }
                    at = star + 1;
                }
                None => {
                    return Err(self.error(LexicalErrorKind::UnterminatedComment, self.token_start))
                }
            }
        }
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    fn scan_question(&mut self) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b'?'), Some(b'=')) => self.punct(3, TokenKind::QuestionQuestionEqualsToken),
            (Some(b'?'), _) => self.punct(2, TokenKind::QuestionQuestionToken),
            // `a?.5:b` is a conditional, not an optional chain.
            (Some(b'.'), next) if !next.map_or(false, |b| b.is_ascii_digit()) => {
                self.punct(2, TokenKind::QuestionDotToken)
            }
            _ => self.punct(1, TokenKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b'<'), Some(b'=')) => self.punct(3, TokenKind::LessThanLessThanEqualsToken),
            (Some(b'<'), _) => self.punct(2, TokenKind::LessThanLessThanToken),
            (Some(b'='), _) => self.punct(2, TokenKind::LessThanEqualsToken),
            _ => self.punct(1, TokenKind::LessThanToken),
        }
    }

    fn scan_equals(&mut self) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b'='), Some(b'=')) => self.punct(3, TokenKind::EqualsEqualsEqualsToken),
            (Some(b'='), _) => self.punct(2, TokenKind::EqualsEqualsToken),
            (Some(b'>'), _) => self.punct(2, TokenKind::EqualsGreaterThanToken),
            _ => self.punct(1, TokenKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b'='), Some(b'=')) => self.punct(3, TokenKind::ExclamationEqualsEqualsToken),
            (Some(b'='), _) => self.punct(2, TokenKind::ExclamationEqualsToken),
            _ => self.punct(1, TokenKind::ExclamationToken),
        }
    }

    fn scan_asterisk(&mut self) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b'*'), Some(b'=')) => self.punct(3, TokenKind::AsteriskAsteriskEqualsToken),
            (Some(b'*'), _) => self.punct(2, TokenKind::AsteriskAsteriskToken),
            (Some(b'='), _) => self.punct(2, TokenKind::AsteriskEqualsToken),
            _ => self.punct(1, TokenKind::AsteriskToken),
        }
    }

    /// `+`, `++`, `+=` and the same shapes for `-`.
    fn scan_repeatable(&mut self, ch: u8, single: TokenKind, double: TokenKind, assign: TokenKind) -> ScanResult {
        match self.peek_byte(1) {
            Some(b) if b == ch => self.punct(2, double),
            Some(b'=') => self.punct(2, assign),
            _ => self.punct(1, single),
        }
    }

    fn scan_compound(&mut self, single: TokenKind, assign: TokenKind) -> ScanResult {
        if self.peek_byte(1) == Some(b'=') {
            self.punct(2, assign)
        } else {
            self.punct(1, single)
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the same shapes for `|`.
    fn scan_logical(
        &mut self,
        ch: u8,
        single: TokenKind,
        assign: TokenKind,
        double: TokenKind,
        double_assign: TokenKind,
    ) -> ScanResult {
        match (self.peek_byte(1), self.peek_byte(2)) {
            (Some(b), Some(b'=')) if b == ch => self.punct(3, double_assign),
            (Some(b), _) if b == ch => self.punct(2, double),
            (Some(b'='), _) => self.punct(2, assign),
            _ => self.punct(1, single),
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> ScanResult {
        let escaped = self.scan_identifier_name()?;
        if escaped {
            return Ok(TokenKind::Identifier);
        }
        Ok(TokenKind::from_keyword(self.token_text()).unwrap_or(TokenKind::Identifier))
    }

    fn scan_private_name(&mut self) -> ScanResult {
        self.pos += 1;
        match self.current_char() {
            Some(c) if c == '\\' || is_identifier_start(c) => {
                self.scan_identifier_name()?;
                Ok(TokenKind::PrivateName)
            }
            _ => Err(self.error(LexicalErrorKind::UnexpectedCharacter('#'), self.token_start)),
        }
    }

    /// Scan an identifier name starting at the current position. Returns
    /// whether it contained a unicode escape.
    fn scan_identifier_name(&mut self) -> Result<bool, ScanError> {
        let mut escaped = false;
        let mut first = true;
        while let Some(ch) = self.current_char() {
            if ch == '\\' {
                let at = self.pos;
                let invalid = self.error(LexicalErrorKind::InvalidIdentifierEscape, at);
                if self.peek_byte(1) != Some(b'u') {
                    return Err(invalid);
                }
                self.pos += 2;
                let decoded = self.scan_unicode_escape_body().and_then(char::from_u32).ok_or(invalid)?;
                let legal = if first {
                    is_identifier_start(decoded)
                } else {
                    is_identifier_part(decoded)
                };
                if !legal {
                    return Err(invalid);
                }
                escaped = true;
            } else if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
            first = false;
        }
        Ok(escaped)
    }

    /// Parse the part of a unicode escape after `\u`: either four hex digits
    /// or a braced code point no larger than 0x10FFFF.
    fn scan_unicode_escape_body(&mut self) -> Option<u32> {
        if self.peek_byte(0) == Some(b'{') {
            let start = self.pos + 1;
            let mut end = start;
            while self.bytes.get(end).map_or(false, u8::is_ascii_hexdigit) {
                end += 1;
            }
            if end == start || self.bytes.get(end) != Some(&b'}') {
                return None;
            }
            let digits = self.text[start..end].trim_start_matches('0');
            let value = if digits.is_empty() {
                0
            } else if digits.len() > 6 {
                return None;
            } else {
                u32::from_str_radix(digits, 16).ok()?
            };
            if value > 0x10FFFF {
                return None;
            }
            self.pos = end + 1;
            Some(value)
        } else {
            let digits = self.text.get(self.pos..self.pos + 4)?;
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            self.pos += 4;
            u32::from_str_radix(digits, 16).ok()
        }
    }

    // ========================================================================
    // Strings and templates
    // ========================================================================

    fn scan_string(&mut self, quote: u8) -> ScanResult {
        let unterminated = self.error(LexicalErrorKind::UnterminatedString, self.token_start);
        self.pos += 1;
        loop {
            let rest = &self.bytes[self.pos..];
            let Some(i) = memchr::memchr3(quote, b'\\', b'\n', rest) else {
                return Err(unterminated);
            };
            if memchr::memchr(b'\r', &rest[..i]).is_some() {
                return Err(unterminated);
            }
            let at = self.pos + i;
            self.pos = at + 1;
            match self.bytes[at] {
                b'\\' => self.scan_escape(false)?,
                b'\n' => return Err(unterminated),
                _ => return Ok(TokenKind::StringLiteral),
            }
        }
    }

    /// Scan a template piece starting at its opening `` ` `` (`head`) or at
    /// the `}` that closed a substitution.
    fn scan_template(&mut self, head: bool) -> ScanResult {
        self.pos += 1;
        loop {
            let rest = &self.bytes[self.pos..];
            let Some(i) = memchr::memchr3(b'`', b'$', b'\\', rest) else {
                return Err(self.error(LexicalErrorKind::UnterminatedTemplate, self.token_start));
            };
            let at = self.pos + i;
            self.pos = at + 1;
            match self.bytes[at] {
                b'`' => {
                    return Ok(if head {
                        TokenKind::NoSubstitutionTemplate
                    } else {
                        TokenKind::TemplateTail
                    })
                }
                b'$' if self.peek_byte(0) == Some(b'{') => {
                    self.pos += 1;
                    self.brackets.push(Bracket::Template);
                    return Ok(if head {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    });
                }
                b'$' => {}
                _ => self.scan_escape(true)?,
            }
        }
    }

    /// Validate one escape sequence; the backslash is already consumed.
    ///
    /// Templates only need the escape to exist: tagged templates may carry
    /// malformed escapes, so `\x`, `\u` and digit forms are not checked there.
    fn scan_escape(&mut self, template: bool) -> Result<(), ScanError> {
        let at = self.pos - 1;
        let Some(ch) = self.current_char() else {
            let kind = if template {
                LexicalErrorKind::UnterminatedTemplate
            } else {
                LexicalErrorKind::UnterminatedString
            };
            return Err(self.error(kind, self.token_start));
        };
        let invalid = self.error(LexicalErrorKind::InvalidEscape, at);
        match ch {
            '\r' => {
                self.pos += if self.peek_byte(1) == Some(b'\n') { 2 } else { 1 };
            }
            'x' if !template => {
                self.pos += 1;
                let digits = self.text.get(self.pos..self.pos + 2).ok_or(invalid)?;
                if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(invalid);
                }
                self.pos += 2;
            }
            'u' if !template => {
                self.pos += 1;
                self.scan_unicode_escape_body().ok_or(invalid)?;
            }
            // Single escape chars, legacy octal and `\8`/`\9`, line
            // continuations, and identity escapes.
            other => self.pos += other.len_utf8(),
        }
        Ok(())
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    fn scan_regex(&mut self) -> ScanResult {
        let unterminated = self.error(LexicalErrorKind::UnterminatedRegex, self.token_start);
        self.pos += 1;
        let mut in_class = false;
        loop {
            let ch = match self.current_char() {
                Some(c) if !is_line_break(c) => c,
                _ => return Err(unterminated),
            };
            self.pos += ch.len_utf8();
            match ch {
                '\\' => match self.current_char() {
                    Some(next) if !is_line_break(next) => self.pos += next.len_utf8(),
                    _ => return Err(unterminated),
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        Ok(TokenKind::RegularExpressionLiteral)
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> ScanResult {
        let kind = if self.bytes[self.pos] == b'0' {
            match self.peek_byte(1) {
                Some(b'x' | b'X') => self.scan_radix_number(is_hex_digit)?,
                Some(b'o' | b'O') => self.scan_radix_number(is_octal_digit)?,
                Some(b'b' | b'B') => self.scan_radix_number(is_binary_digit)?,
                Some(b'0'..=b'9') => self.scan_legacy_octal()?,
                Some(b'_') => return Err(self.invalid_number()),
                _ => self.scan_decimal()?,
            }
        } else {
            self.scan_decimal()?
        };

        // `3in`, `1_`, `0b12`: nothing identifier-like may touch a number.
        match self.current_char() {
            Some(c) if c == '\\' || is_identifier_start(c) || is_digit(c) => {
                Err(self.invalid_number())
            }
            _ => Ok(kind),
        }
    }

    #[inline]
    fn invalid_number(&self) -> ScanError {
        self.error(LexicalErrorKind::InvalidNumber, self.token_start)
    }

    /// Scan a run of digits with `_` separators, which may only stand
    /// between two digits. Returns the number of digits.
    fn scan_digits(&mut self, is_radix_digit: fn(char) -> bool) -> Result<usize, ScanError> {
        let mut count = 0;
        loop {
            match self.current_char() {
                Some('_') => {
                    let next_ok = self.char_after(1).map_or(false, is_radix_digit);
                    if count == 0 || self.bytes[self.pos - 1] == b'_' || !next_ok {
                        return Err(self.invalid_number());
                    }
                    self.pos += 1;
                }
                Some(c) if is_radix_digit(c) => {
                    self.pos += 1;
                    count += 1;
                }
                _ => return Ok(count),
            }
        }
    }

    fn scan_radix_number(&mut self, is_radix_digit: fn(char) -> bool) -> ScanResult {
        self.pos += 2;
        if self.scan_digits(is_radix_digit)? == 0 {
            return Err(self.invalid_number());
        }
        self.scan_bigint_suffix(true)
    }

    fn scan_decimal(&mut self) -> ScanResult {
        if self.bytes[self.pos] != b'.' {
            self.scan_digits(is_digit)?;
        }
        let integer = self.scan_fraction_and_exponent()?;
        self.scan_bigint_suffix(integer)
    }

    /// `017` and `089`: legacy forms without separators or bigint suffix.
    /// Those containing 8 or 9 are decimal and may take a fraction.
    fn scan_legacy_octal(&mut self) -> ScanResult {
        let mut decimal = false;
        while let Some(b) = self.peek_byte(0) {
            if !b.is_ascii_digit() {
                break;
            }
            decimal |= b >= b'8';
            self.pos += 1;
        }
        if self.peek_byte(0) == Some(b'_') {
            return Err(self.invalid_number());
        }
        if decimal {
            self.scan_fraction_and_exponent()?;
        }
        Ok(TokenKind::NumericLiteral)
    }

    /// Returns whether the literal is still an integer afterwards.
    fn scan_fraction_and_exponent(&mut self) -> Result<bool, ScanError> {
        let mut integer = true;
        if self.peek_byte(0) == Some(b'.') {
            self.pos += 1;
            integer = false;
            if self.peek_byte(0) == Some(b'_') {
                return Err(self.invalid_number());
            }
            self.scan_digits(is_digit)?;
        }
        if let Some(b'e' | b'E') = self.peek_byte(0) {
            self.pos += 1;
            integer = false;
            if let Some(b'+' | b'-') = self.peek_byte(0) {
                self.pos += 1;
            }
            if self.scan_digits(is_digit)? == 0 {
                return Err(self.invalid_number());
            }
        }
        Ok(integer)
    }

    fn scan_bigint_suffix(&mut self, integer: bool) -> ScanResult {
        if self.peek_byte(0) != Some(b'n') {
            return Ok(TokenKind::NumericLiteral);
        }
        if !integer {
            return Err(self.invalid_number());
        }
        self.pos += 1;
        Ok(TokenKind::BigIntLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan().unwrap();
            if kind == TokenKind::EndOfInput {
                return out;
            }
            if !kind.is_trivia() {
                out.push(kind);
            }
        }
    }

    fn scan_error(source: &str) -> ScanError {
        let mut scanner = Scanner::new(source);
        loop {
            match scanner.scan() {
                Ok(TokenKind::EndOfInput) => panic!("expected an error for {:?}", source),
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("(){}[];,"),
            vec![
                TokenKind::OpenParenToken,
                TokenKind::CloseParenToken,
                TokenKind::OpenBraceToken,
                TokenKind::CloseBraceToken,
                TokenKind::OpenBracketToken,
                TokenKind::CloseBracketToken,
                TokenKind::SemicolonToken,
                TokenKind::CommaToken,
            ]
        );
    }

    #[test]
    fn test_greater_than_is_never_combined() {
        assert_eq!(
            kinds("a >>>= b"),
            vec![
                TokenKind::Identifier,
                TokenKind::GreaterThanToken,
                TokenKind::GreaterThanToken,
                TokenKind::GreaterThanToken,
                TokenKind::EqualsToken,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_control_paren_allows_regex() {
        assert_eq!(
            kinds("if (a) /b/.test(c)"),
            vec![
                TokenKind::IfKeyword,
                TokenKind::OpenParenToken,
                TokenKind::Identifier,
                TokenKind::CloseParenToken,
                TokenKind::RegularExpressionLiteral,
                TokenKind::DotToken,
                TokenKind::Identifier,
                TokenKind::OpenParenToken,
                TokenKind::Identifier,
                TokenKind::CloseParenToken,
            ]
        );
        assert_eq!(kinds("(a) / b")[3], TokenKind::SlashToken);
    }

    #[test]
    fn test_object_literal_openers() {
        assert!(opens_object_literal(TokenKind::EqualsToken));
        assert!(opens_object_literal(TokenKind::OpenParenToken));
        assert!(opens_object_literal(TokenKind::ReturnKeyword));
        assert!(!opens_object_literal(TokenKind::CloseParenToken));
        assert!(!opens_object_literal(TokenKind::SemicolonToken));
        assert!(!opens_object_literal(TokenKind::EndOfInput));
        assert!(!opens_object_literal(TokenKind::Identifier));
        assert!(!opens_object_literal(TokenKind::DotToken));
    }

    #[test]
    fn test_division_after_function_expression_body() {
        assert_eq!(kinds("x = function(){} / 1")[7], TokenKind::SlashToken);
        assert_eq!(kinds("x = function({ a } = {}) { {} } / 1")[15], TokenKind::SlashToken);
        assert_eq!(kinds("x = class { m() {} } / 1")[10], TokenKind::SlashToken);
        assert_eq!(kinds("function f() {} /re/")[6], TokenKind::RegularExpressionLiteral);
        assert_eq!(kinds("class A {} /re/")[4], TokenKind::RegularExpressionLiteral);
    }

    #[test]
    fn test_increment_keeps_division_state() {
        assert_eq!(kinds("a++ / 2")[2], TokenKind::SlashToken);
        assert_eq!(kinds("++/a/.b")[1], TokenKind::RegularExpressionLiteral);
    }

    #[test]
    fn test_template_resumes_after_brace() {
        assert_eq!(
            kinds("`a${ {b: 1} }c${d}e`"),
            vec![
                TokenKind::TemplateHead,
                TokenKind::OpenBraceToken,
                TokenKind::Identifier,
                TokenKind::ColonToken,
                TokenKind::NumericLiteral,
                TokenKind::CloseBraceToken,
                TokenKind::TemplateMiddle,
                TokenKind::Identifier,
                TokenKind::TemplateTail,
            ]
        );
    }

    #[test]
    fn test_bracket_errors() {
        assert_eq!(scan_error("(]").kind, LexicalErrorKind::MismatchedBracket(']'));
        assert_eq!(scan_error("{(").kind, LexicalErrorKind::UnclosedBracket('('));
        assert_eq!(scan_error("`a${b").kind, LexicalErrorKind::UnterminatedTemplate);
        assert_eq!(scan_error("}").offset, 0);
    }

    #[test]
    fn test_number_errors() {
        for source in ["1__0", "1_", "0x", "1.5n", "3in", "1e", "0_1", "08n"] {
            assert_eq!(scan_error(source).kind, LexicalErrorKind::InvalidNumber, "{}", source);
        }
    }

    #[test]
    fn test_identifier_escapes() {
        assert_eq!(kinds("\\u0061b"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("a\\u{62}"), vec![TokenKind::Identifier]);
        // Escaped keywords stay identifiers.
        assert_eq!(kinds("\\u0069f"), vec![TokenKind::Identifier]);
        assert_eq!(scan_error("\\u0031").kind, LexicalErrorKind::InvalidIdentifierEscape);
        assert_eq!(scan_error("a\\x41").kind, LexicalErrorKind::InvalidIdentifierEscape);
    }
}
