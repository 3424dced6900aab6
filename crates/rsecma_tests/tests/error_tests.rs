//! The chained error model as seen from whole inputs.

use rsecma_ast::TokenKind;
use rsecma_diagnostics::{messages, ErrorCause, LexicalErrorKind};
use rsecma_parser::{parse_module, parse_script};

#[test]
fn test_chain_for_invalid_binding() {
    let err = parse_script("let 1 = 2;").unwrap_err();
    assert_eq!(
        err.productions(),
        vec!["Script", "StatementListItem", "LexicalDeclaration", "VariableDeclarator", "BindingPattern"]
    );
    assert!(matches!(err.root_cause(), ErrorCause::Expected("binding pattern")));
    assert_eq!(err.token().kind, TokenKind::NumericLiteral);
    assert_eq!(err.position().line, 1);
    assert_eq!(err.position().column, 5);
    assert!(
        err.to_string()
            .starts_with("expected binding pattern while parsing BindingPattern at 1:5 (Script > "),
        "{}",
        err
    );
    assert_eq!(err.code(), messages::EXPECTED.code);
    assert!(!err.is_fatal());
}

#[test]
fn test_error_token_text() {
    let source = "x = (1 + );";
    let err = parse_script(source).unwrap_err();
    assert_eq!(err.token().text(source), ")");
}

#[test]
fn test_positions_count_lines_and_characters() {
    let err = parse_script("a;\n\nlet 1;").unwrap_err();
    assert_eq!((err.position().line, err.position().column), (3, 5));

    // `é` is two bytes but one column.
    let err = parse_script("'é'; let 1 = 2;").unwrap_err();
    assert_eq!(err.position().column, 10);
    assert_eq!(err.position().offset, 10);
}

#[test]
fn test_missing_operand_points_at_next_token() {
    let err = parse_script("a + ;").unwrap_err();
    assert_eq!(err.token().kind, TokenKind::SemicolonToken);
    assert_eq!(err.position().column, 5);
}

#[test]
fn test_invalid_target_is_a_conversion_error() {
    let err = parse_script("a + 1 = 2;").unwrap_err();
    assert!(matches!(err.root_cause(), ErrorCause::Conversion(_)), "{}", err);
    assert_eq!(err.code(), messages::INVALID_CONVERSION.code);
    assert!(err.to_string().starts_with("invalid assignment target"), "{}", err);
}

#[test]
fn test_lexical_errors_are_fatal() {
    let err = parse_script("let s = 'abc").unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.productions(), vec!["Tokenize"]);
    match err.root_cause() {
        ErrorCause::Lexical(lexical) => {
            assert_eq!(lexical.kind, LexicalErrorKind::UnterminatedString);
            assert_eq!(lexical.pos.column, 9);
        }
        other => panic!("expected lexical error, got {:?}", other),
    }
    assert_eq!(err.code(), messages::UNTERMINATED_STRING.code);
}

#[test]
fn test_mismatched_brackets_are_lexical() {
    let err = parse_module("f(a]);").unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ErrorCause::Lexical(lexical) if lexical.kind == LexicalErrorKind::MismatchedBracket(']')
    ));
}

#[test]
fn test_chain_frames_carry_tokens() {
    let err = parse_script("if (a) { b + ; }").unwrap_err();
    let frames: Vec<_> = err.chain().collect();
    assert_eq!(frames.first().map(|f| f.production), Some("Script"));
    // Inner frames never point before the frames enclosing them.
    for pair in frames.windows(2) {
        assert!(pair[0].token.index <= pair[1].token.index, "{}", err);
    }
    assert_eq!(err.token().kind, TokenKind::SemicolonToken);
}
