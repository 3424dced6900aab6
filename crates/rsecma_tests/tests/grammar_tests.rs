//! Grammar ambiguities resolved across the scanner and parser: backtracking,
//! regex versus division, automatic semicolon insertion, cover grammars.

use rsecma_ast::*;
use rsecma_parser::{parse_module, parse_script, ParseOptions};
use rsecma_tests::{parse_ok, span_violations, text_of};

fn statements(source: &str) -> Vec<Statement<'_>> {
    parse_ok(source, &ParseOptions::default()).body
}

fn expression(source: &str) -> Expression<'_> {
    match statements(source).into_iter().next() {
        Some(Statement::Expression(stmt)) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn is_regex(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Literal(lit) if lit.kind == LiteralKind::RegExp)
}

// ============================================================================
// Backtracking
// ============================================================================

#[test]
fn test_failed_declaration_leaves_no_trace() {
    // `let` first fails as a declaration, then parses as an identifier.
    match expression("let = 1;") {
        Expression::Assignment(assign) => match &assign.target {
            AssignmentTarget::Simple(SimpleAssignmentTarget::Identifier(id)) => {
                assert_eq!(id.name, "let")
            }
            other => panic!("expected identifier target, got {:?}", other),
        },
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_arrow_and_parenthesized_share_a_prefix() {
    assert!(matches!(expression("(a, b) => a;"), Expression::Arrow(_)));
    assert!(matches!(expression("(a, b);"), Expression::Parenthesized(_)));
    assert!(matches!(expression("async (a);"), Expression::Call(_)));
    assert!(matches!(expression("async (a) => a;"), Expression::Arrow(_)));
}

#[test]
fn test_backtracked_spans_stay_consistent() {
    let source = "(a, [b, { c }]) => c;\n({ d } = e);\nasync\n(f);";
    let program = parse_ok(source, &ParseOptions::default());
    assert_eq!(program.body.len(), 3);
    assert!(span_violations(&program).is_empty());
    assert_eq!(text_of(&program, program.body[0].span()), "(a, [b, { c }]) => c;");
}

// ============================================================================
// Regex versus division
// ============================================================================

#[test]
fn test_slash_after_operand_is_division() {
    for source in ["a / b;", "a++ / 2;", "(a) / 2;", "a[0] / 2;", "this / 2;", "1 / 2 / 3;"] {
        assert!(matches!(expression(source), Expression::Binary(_)), "{}", source);
    }
}

#[test]
fn test_slash_after_operator_is_regex() {
    match expression("x = /ab+c/i;") {
        Expression::Assignment(assign) => assert!(is_regex(&assign.value)),
        other => panic!("expected assignment, got {:?}", other),
    }
    match expression("f(/=/, /x/g);") {
        Expression::Call(call) => assert_eq!(call.arguments.len(), 2),
        other => panic!("expected call, got {:?}", other),
    }
    assert!(parse_script("function f() { return /re/.test(s); }").is_ok());
    assert!(parse_script("typeof /re/;").is_ok());
}

#[test]
fn test_regex_after_block_statement() {
    let body = statements("{}\n/re/.test(s);");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[1], Statement::Expression(_)));
}

#[test]
fn test_slash_after_reserved_property_name_is_division() {
    for source in ["x = a.default / 2 / 1;", "x = a?.return / b;", "x = y.delete / 2 / 3;"] {
        match expression(source) {
            Expression::Assignment(assign) => {
                assert!(matches!(assign.value, Expression::Binary(_)), "{}", source)
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }
}

#[test]
fn test_slash_after_object_literal_is_division() {
    match expression("x = {} / 1;") {
        Expression::Assignment(assign) => match &assign.value {
            Expression::Binary(binary) => assert!(matches!(binary.left, Expression::Object(_))),
            other => panic!("expected division, got {:?}", other),
        },
        other => panic!("expected assignment, got {:?}", other),
    }
    assert!(matches!(expression("({}) / 1;"), Expression::Binary(_)));
    assert!(parse_script("x = function () {} / 1;").is_ok());
    assert!(parse_script("x = class { m() {} } / 1;").is_ok());
}

#[test]
fn test_division_across_line_break() {
    // No semicolon is inserted: the slash continues the expression.
    let body = statements("a = b\n/c/d");
    assert_eq!(body.len(), 1);
}

// ============================================================================
// Automatic semicolon insertion
// ============================================================================

#[test]
fn test_asi_at_line_breaks_and_braces() {
    assert_eq!(statements("a\nb").len(), 2);
    assert_eq!(statements("{ a } b").len(), 2);
    assert_eq!(statements("a").len(), 1);
    assert!(parse_script("a b").is_err());
}

#[test]
fn test_restricted_productions() {
    match &statements("function f() { return\nvalue; }")[0] {
        Statement::Function(f) => {
            assert_eq!(f.body.statements.len(), 2);
            assert!(matches!(&f.body.statements[0], Statement::Return(r) if r.argument.is_none()));
        }
        other => panic!("expected function, got {:?}", other),
    }
    // `a\n++b` is `a; ++b;`
    let body = statements("a\n++b");
    assert_eq!(body.len(), 2);
    assert!(parse_script("throw\nerr;").is_err());
}

#[test]
fn test_no_asi_inside_for_header() {
    assert!(parse_script("for (a\nb;;) {}").is_err());
    assert!(parse_script("for (;;\n) {}").is_ok());
}

#[test]
fn test_continuation_lines_are_not_split() {
    // Parenthesis and template on the next line continue the expression.
    assert_eq!(statements("a = b\n(c)").len(), 1);
    assert_eq!(statements("a = b\n`c`").len(), 1);
}

// ============================================================================
// Cover grammars
// ============================================================================

#[test]
fn test_object_literal_becomes_assignment_pattern() {
    match expression("({ a, b: [c, ...d], e = 1 } = o);") {
        Expression::Parenthesized(paren) => match &paren.expression {
            Expression::Assignment(assign) => {
                assert!(matches!(
                    assign.target,
                    AssignmentTarget::Pattern(AssignmentPattern::Object(_))
                ));
            }
            other => panic!("expected assignment, got {:?}", other),
        },
        other => panic!("expected parenthesized, got {:?}", other),
    }
}

#[test]
fn test_cover_initializer_outside_pattern_is_accepted() {
    // Shorthand initializers are kept as written when no pattern results.
    assert!(parse_script("({ a = 1 });").is_ok());
}

#[test]
fn test_invalid_cover_conversions() {
    assert!(parse_script("({ a: 1 } = o);").is_err());
    assert!(parse_script("[...a, b] = c;").is_err());
    assert!(parse_script("(a, b) = c;").is_err());
    assert!(parse_script("(1) => 1;").is_err());
    assert!(parse_script("a?.b = 1;").is_err());
}

#[test]
fn test_parenthesized_target() {
    assert!(parse_script("(a) = 1;").is_ok());
    assert!(parse_script("(a.b) = 1;").is_ok());
    assert!(parse_script("({a}) = 1;").is_err());
}

#[test]
fn test_for_in_of_heads_convert() {
    assert!(parse_script("for ([a, b] of pairs);").is_ok());
    assert!(parse_script("for ({ a } in o);").is_ok());
    assert!(parse_script("for (f() of xs);").is_err());
}

#[test]
fn test_async_cannot_start_a_for_of_target() {
    assert!(parse_script("for (async of x);").is_err());
    assert!(parse_script("for (async in x);").is_ok());
    assert!(parse_script("for ((async) of x);").is_ok());
    assert!(parse_script("async function f() { for await (async of x); }").is_ok());
    // An arrow with a parameter named `of` in the three-part head.
    assert!(parse_script("for (async of => {};;) break;").is_ok());
}

#[test]
fn test_let_bracket_is_always_a_declaration() {
    let err = parse_script("let [a];").unwrap_err();
    assert!(err.productions().contains(&"LexicalDeclaration"), "{}", err);
    assert!(parse_script("let [a] = b;").is_ok());
    // `let` followed by anything else may still be an identifier.
    assert!(parse_script("let\n(a);").is_ok());
    assert!(parse_script("let.x = 1;").is_ok());
}

// ============================================================================
// Goal symbols
// ============================================================================

#[test]
fn test_await_is_an_identifier_in_scripts() {
    assert!(parse_script("var await = 1;").is_ok());
    assert!(parse_module("var await = 1;").is_err());
    assert!(parse_script("async function f() { var await; }").is_err());
}

#[test]
fn test_yield_inside_generators() {
    assert!(parse_script("var yield = 1;").is_ok());
    assert!(parse_script("function* g() { var yield; }").is_err());
    assert!(parse_script("function* g() { yield\n1; }").is_ok());
}
