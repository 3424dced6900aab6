//! Tests for the ECMAScript scanner and tokenizer.

use rsecma_ast::TokenKind;
use rsecma_core::Position;
use rsecma_diagnostics::LexicalErrorKind;
use rsecma_scanner::{tokenize, Scanner};

/// Scan all significant tokens, returning (kind, text) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan().unwrap();
        if kind == TokenKind::EndOfInput {
            break;
        }
        if !kind.is_trivia() {
            tokens.push((kind, scanner.token_text().to_string()));
        }
    }
    tokens
}

/// Scan and return just the significant kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

fn scan_error(source: &str) -> LexicalErrorKind {
    tokenize(source).unwrap_err().kind
}

#[test]
fn test_empty_source() {
    let buffer = tokenize("").unwrap();
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.tokens()[0].kind, TokenKind::EndOfInput);
    assert_eq!(buffer.tokens()[0].raw, "");
}

#[test]
fn test_trivia_tokens() {
    let buffer = tokenize("  \t\n\r\n// c\n/* a\nb */").unwrap();
    let kinds: Vec<_> = buffer.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Whitespace,
            TokenKind::LineTerminator,
            TokenKind::LineTerminator,
            TokenKind::SingleLineComment,
            TokenKind::LineTerminator,
            TokenKind::MultiLineComment,
            TokenKind::EndOfInput,
        ]
    );
    assert!(buffer.tokens()[5].has_line_terminator());
}

#[test]
fn test_tokens_tile_source() {
    let source = "#!/usr/bin/env node\nlet x = `a${ y /* c */ }b`; // done\r\nf(/re/g, 1_000n)";
    let buffer = tokenize(source).unwrap();
    let joined: String = buffer.tokens().iter().map(|t| t.raw).collect();
    assert_eq!(joined, source);
    assert_eq!(buffer.tokens()[0].kind, TokenKind::Hashbang);
    assert_eq!(buffer.tokens()[0].raw, "#!/usr/bin/env node");
}

#[test]
fn test_hashbang_only_at_start() {
    assert_eq!(scan_error(" #!x"), LexicalErrorKind::UnexpectedCharacter('#'));
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = scan_all("const foo = async yield of");
    assert_eq!(tokens[0].0, TokenKind::ConstKeyword);
    assert_eq!(tokens[1], (TokenKind::Identifier, "foo".to_string()));
    // Contextual words stay identifiers.
    assert_eq!(tokens[3].0, TokenKind::Identifier);
    assert_eq!(tokens[4].0, TokenKind::Identifier);
    assert_eq!(tokens[5].0, TokenKind::Identifier);
}

#[test]
fn test_unicode_identifiers() {
    let tokens = scan_all("café ℵx $_ _$");
    assert_eq!(tokens.len(), 4);
    assert!(tokens.iter().all(|(k, _)| *k == TokenKind::Identifier));
    assert_eq!(tokens[0].1, "café");
}

#[test]
fn test_private_name() {
    assert_eq!(
        scan_all("this.#count"),
        vec![
            (TokenKind::ThisKeyword, "this".to_string()),
            (TokenKind::DotToken, ".".to_string()),
            (TokenKind::PrivateName, "#count".to_string()),
        ]
    );
}

#[test]
fn test_numbers() {
    let tokens = scan_all("0 42 3.14 .5 1e10 2E-3 0xFF 0o17 0b1010 1_000_000 10n 0x1Fn 017 089 1.");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::BigIntLiteral,
            TokenKind::BigIntLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
        ]
    );
    assert_eq!(tokens[3].1, ".5");
    assert_eq!(tokens[9].1, "1_000_000");
}

#[test]
fn test_member_access_on_number() {
    assert_eq!(
        scan_kinds("1..toString()"),
        vec![
            TokenKind::NumericLiteral,
            TokenKind::DotToken,
            TokenKind::Identifier,
            TokenKind::OpenParenToken,
            TokenKind::CloseParenToken,
        ]
    );
}

#[test]
fn test_invalid_numbers() {
    for source in ["1_", "1__2", "0b", "0b2", "0o8", "1e+", "2.5n", "1e3n", "5x", "07n", "0_5", "1._5"] {
        assert_eq!(scan_error(source), LexicalErrorKind::InvalidNumber, "{}", source);
    }
}

#[test]
fn test_strings() {
    let tokens = scan_all(r#"'a' "b\"c" 'd\x41B\u{1F600}' '\0\12\8' 'e\
f'"#);
    assert_eq!(tokens.len(), 5);
    assert!(tokens.iter().all(|(k, _)| *k == TokenKind::StringLiteral));
    assert_eq!(tokens[1].1, r#""b\"c""#);
}

#[test]
fn test_string_line_separator_allowed() {
    assert_eq!(scan_kinds("'a\u{2028}b'"), vec![TokenKind::StringLiteral]);
}

#[test]
fn test_string_errors() {
    assert_eq!(scan_error("'abc"), LexicalErrorKind::UnterminatedString);
    assert_eq!(scan_error("'ab\ncd'"), LexicalErrorKind::UnterminatedString);
    assert_eq!(scan_error("'ab\rcd'"), LexicalErrorKind::UnterminatedString);
    assert_eq!(scan_error("'ab\\"), LexicalErrorKind::UnterminatedString);
    assert_eq!(scan_error(r"'\xZ1'"), LexicalErrorKind::InvalidEscape);
    assert_eq!(scan_error(r"'\u12'"), LexicalErrorKind::InvalidEscape);
    assert_eq!(scan_error(r"'\u{110000}'"), LexicalErrorKind::InvalidEscape);
    assert_eq!(scan_error(r"'\u{}'"), LexicalErrorKind::InvalidEscape);
}

#[test]
fn test_string_error_points_at_opening_quote() {
    let err = tokenize("x;\n  'open").unwrap_err();
    assert_eq!(err.pos, Position::new(5, 2, 3));
}

#[test]
fn test_punctuators() {
    let tokens = scan_all("?. ?? ??= ... => === !== **= &&= ||= <<= ++ -- ~ @ ?");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::QuestionDotToken,
            TokenKind::QuestionQuestionToken,
            TokenKind::QuestionQuestionEqualsToken,
            TokenKind::DotDotDotToken,
            TokenKind::EqualsGreaterThanToken,
            TokenKind::EqualsEqualsEqualsToken,
            TokenKind::ExclamationEqualsEqualsToken,
            TokenKind::AsteriskAsteriskEqualsToken,
            TokenKind::AmpersandAmpersandEqualsToken,
            TokenKind::BarBarEqualsToken,
            TokenKind::LessThanLessThanEqualsToken,
            TokenKind::PlusPlusToken,
            TokenKind::MinusMinusToken,
            TokenKind::TildeToken,
            TokenKind::AtToken,
            TokenKind::QuestionToken,
        ]
    );
}

#[test]
fn test_optional_chain_before_digit_is_conditional() {
    assert_eq!(
        scan_kinds("a?.5:b"),
        vec![
            TokenKind::Identifier,
            TokenKind::QuestionToken,
            TokenKind::NumericLiteral,
            TokenKind::ColonToken,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_division_after_identifier() {
    assert_eq!(
        scan_kinds("a / b / c"),
        vec![
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(scan_kinds("a /= 2")[1], TokenKind::SlashEqualsToken);
}

#[test]
fn test_regex_at_start_and_after_operators() {
    assert_eq!(scan_all("/ab+c/gi")[0], (TokenKind::RegularExpressionLiteral, "/ab+c/gi".to_string()));
    assert_eq!(scan_kinds("x = /=/")[2], TokenKind::RegularExpressionLiteral);
    assert_eq!(scan_kinds("f(/a/, /b/)")[2], TokenKind::RegularExpressionLiteral);
    assert_eq!(scan_kinds("return /a/")[1], TokenKind::RegularExpressionLiteral);
}

#[test]
fn test_regex_after_statement_end() {
    let kinds = scan_kinds("a.b(); /x/g.test(a)");
    assert_eq!(kinds[5], TokenKind::SemicolonToken);
    assert_eq!(kinds[6], TokenKind::RegularExpressionLiteral);
}

#[test]
fn test_regex_classes_and_escapes() {
    let tokens = scan_all(r"/[/\]]+\//u");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].0, TokenKind::RegularExpressionLiteral);
}

#[test]
fn test_regex_errors() {
    assert_eq!(scan_error("/abc"), LexicalErrorKind::UnterminatedRegex);
    assert_eq!(scan_error("/ab\nc/"), LexicalErrorKind::UnterminatedRegex);
    assert_eq!(scan_error("/ab\\"), LexicalErrorKind::UnterminatedRegex);
}

#[test]
fn test_division_after_close_bracket_and_literals() {
    assert_eq!(scan_kinds("a[0] / 2")[4], TokenKind::SlashToken);
    assert_eq!(scan_kinds("\"s\" / 2")[1], TokenKind::SlashToken);
    assert_eq!(scan_kinds("this / 2")[1], TokenKind::SlashToken);
    assert_eq!(scan_kinds("`t` / 2")[1], TokenKind::SlashToken);
}

#[test]
fn test_division_after_reserved_property_name() {
    assert_eq!(
        scan_kinds("a.default / 2 / 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::DotToken,
            TokenKind::DefaultKeyword,
            TokenKind::SlashToken,
            TokenKind::NumericLiteral,
            TokenKind::SlashToken,
            TokenKind::NumericLiteral,
        ]
    );
    assert_eq!(scan_kinds("a?.return / b")[3], TokenKind::SlashToken);
    assert_eq!(scan_kinds("y.delete / 2 / 3")[3], TokenKind::SlashToken);
    // Outside a member access the keyword still starts an operand.
    assert_eq!(scan_kinds("return /a/")[1], TokenKind::RegularExpressionLiteral);
}

#[test]
fn test_division_after_object_literal() {
    assert_eq!(scan_kinds("x = {} / 1")[4], TokenKind::SlashToken);
    assert_eq!(scan_kinds("({}) / 1")[4], TokenKind::SlashToken);
    assert_eq!(scan_kinds("f({ a: 1 } / 2)")[7], TokenKind::SlashToken);
    // A block or function body still lets a regex follow.
    assert_eq!(scan_kinds("{}\n/re/g")[2], TokenKind::RegularExpressionLiteral);
    assert_eq!(scan_kinds("a; {} /re/")[4], TokenKind::RegularExpressionLiteral);
    assert_eq!(scan_kinds("if (a) {} /re/")[6], TokenKind::RegularExpressionLiteral);
    assert_eq!(scan_kinds("function f() {} /re/")[6], TokenKind::RegularExpressionLiteral);
}

#[test]
fn test_regex_after_control_head() {
    let kinds = scan_kinds("while (x) /re/.exec(s)");
    assert_eq!(kinds[4], TokenKind::RegularExpressionLiteral);
    let kinds = scan_kinds("f(x) / 2");
    assert_eq!(kinds[4], TokenKind::SlashToken);
}

#[test]
fn test_templates() {
    assert_eq!(
        scan_all("`plain`"),
        vec![(TokenKind::NoSubstitutionTemplate, "`plain`".to_string())]
    );
    assert_eq!(
        scan_all("`a${b}c${d}e`"),
        vec![
            (TokenKind::TemplateHead, "`a${".to_string()),
            (TokenKind::Identifier, "b".to_string()),
            (TokenKind::TemplateMiddle, "}c${".to_string()),
            (TokenKind::Identifier, "d".to_string()),
            (TokenKind::TemplateTail, "}e`".to_string()),
        ]
    );
}

#[test]
fn test_nested_templates() {
    let kinds = scan_kinds("`x${ `y${ z }` }w`");
    assert_eq!(
        kinds,
        vec![
            TokenKind::TemplateHead,
            TokenKind::TemplateHead,
            TokenKind::Identifier,
            TokenKind::TemplateTail,
            TokenKind::TemplateTail,
        ]
    );
}

#[test]
fn test_template_with_braces_and_dollar() {
    let kinds = scan_kinds("`$a ${ function () { return {}; } } $`");
    assert_eq!(kinds.first(), Some(&TokenKind::TemplateHead));
    assert_eq!(kinds.last(), Some(&TokenKind::TemplateTail));
}

#[test]
fn test_template_tolerates_malformed_escapes() {
    assert_eq!(scan_kinds(r"tag`\unicode \xZ`"), vec![TokenKind::Identifier, TokenKind::NoSubstitutionTemplate]);
}

#[test]
fn test_template_allows_line_terminators() {
    let buffer = tokenize("`a\nb`\nx").unwrap();
    let x = buffer.significant().nth(1).unwrap();
    assert_eq!(x.pos, Position::new(6, 3, 1));
}

#[test]
fn test_template_errors() {
    assert_eq!(scan_error("`abc"), LexicalErrorKind::UnterminatedTemplate);
    assert_eq!(scan_error("`a${b}c"), LexicalErrorKind::UnterminatedTemplate);
    assert_eq!(scan_error("`a${b"), LexicalErrorKind::UnterminatedTemplate);
}

#[test]
fn test_bracket_balance_errors() {
    assert_eq!(scan_error("(a]"), LexicalErrorKind::MismatchedBracket(']'));
    assert_eq!(scan_error("[a)"), LexicalErrorKind::MismatchedBracket(')'));
    assert_eq!(scan_error("a)"), LexicalErrorKind::MismatchedBracket(')'));
    assert_eq!(scan_error("{ a"), LexicalErrorKind::UnclosedBracket('{'));
    assert_eq!(scan_error("f(["), LexicalErrorKind::UnclosedBracket('['));
}

#[test]
fn test_unclosed_bracket_reported_at_end() {
    let err = tokenize("f(\n  a").unwrap_err();
    assert_eq!(err.pos, Position::new(6, 2, 4));
}

#[test]
fn test_comment_errors() {
    assert_eq!(scan_error("a /* never closed"), LexicalErrorKind::UnterminatedComment);
}

#[test]
fn test_unexpected_characters() {
    assert_eq!(scan_error("a ¬ b"), LexicalErrorKind::UnexpectedCharacter('¬'));
    assert_eq!(scan_error("#"), LexicalErrorKind::UnexpectedCharacter('#'));
    assert_eq!(scan_error("\\"), LexicalErrorKind::InvalidIdentifierEscape);
}

#[test]
fn test_single_line_comment_stops_at_paragraph_separator() {
    let buffer = tokenize("// a\u{2029}b").unwrap();
    let kinds: Vec<_> = buffer.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::SingleLineComment,
            TokenKind::LineTerminator,
            TokenKind::Identifier,
            TokenKind::EndOfInput,
        ]
    );
    // A non-separator character that shares the 0xE2 lead byte.
    let buffer = tokenize("// a → b").unwrap();
    assert_eq!(buffer.tokens()[0].raw, "// a → b");
}

#[test]
fn test_crlf_positions() {
    let buffer = tokenize("a\r\nb\rc\nd").unwrap();
    let positions: Vec<_> = buffer.significant().map(|t| (t.pos.line, t.pos.column)).collect();
    assert_eq!(positions, vec![(1, 1), (2, 1), (3, 1), (4, 1), (4, 2)]);
}
