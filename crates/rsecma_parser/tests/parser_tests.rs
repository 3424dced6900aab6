//! Parser integration tests.
//!
//! Verifies the tree shapes, error chains and option handling of the public
//! parsing entry points.

use rsecma_ast::{Expression, SourceType, Statement};
use rsecma_parser::{parse, parse_module, parse_script, ParseOptions};

/// Helper: parse a script and return the number of top-level statements.
fn statement_count(source: &str) -> usize {
    match parse_script(source) {
        Ok(program) => program.body.len(),
        Err(err) => panic!("source: {}\nerror: {}", source, err),
    }
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(statement_count(source), expected, "source: {}", source);
}

/// Helper: assert that a script fails and return the rendered error.
fn script_error(source: &str) -> String {
    match parse_script(source) {
        Ok(program) => panic!("source parsed: {}\n{:?}", source, program.body),
        Err(err) => err.to_string(),
    }
}

fn first_expression(source: &str) -> Expression<'_> {
    match parse_script(source).unwrap().body.into_iter().next() {
        Some(Statement::Expression(stmt)) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_empty_program() {
    let program = parse_script("").unwrap();
    assert!(program.body.is_empty());
    assert_eq!(program.span, program.tokens.full_span());
}

#[test]
fn test_program_span_covers_trivia() {
    let program = parse_script("  // leading\nx;\n/* trailing */\n").unwrap();
    assert_eq!(program.span.start, 0);
    assert_eq!(program.span.end as usize, program.tokens.len());
}

#[test]
fn test_source_type_is_recorded() {
    assert_eq!(parse_script("x;").unwrap().source_type, SourceType::Script);
    assert_eq!(parse_module("x;").unwrap().source_type, SourceType::Module);
}

#[test]
fn test_multiple_statements() {
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
    assert_statement_count("a\nb\nc", 3);
    assert_statement_count(";;;", 3);
}

// ============================================================================
// Declarations and statements
// ============================================================================

#[test]
fn test_declarations() {
    assert_statement_count("function foo(a, b = 1, ...c) {}", 1);
    assert_statement_count("class A extends B { static #x = 1; }", 1);
    assert_statement_count("async function* gen() { yield* other(); await x; }", 1);
}

#[test]
fn test_control_flow() {
    assert_statement_count(
        "if (a) b; else c;\n\
         for (;;) break;\n\
         for (const x of xs) continue;\n\
         for (var k in o);\n\
         while (x) x--;\n\
         do x++; while (x < 10)\n\
         switch (v) { case 1: case 2: f(); break; default: g(); }\n\
         try { t(); } catch { } finally { }\n\
         outer: for (;;) { break outer; }",
        9,
    );
}

#[test]
fn test_regex_and_division() {
    let program = parse_script("var r = /ab+c/gi; var d = a / b / c;").unwrap();
    assert_eq!(program.body.len(), 2);
    assert!(parse_script("x = a\n/b/g").is_ok());
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_member_call_chain() {
    assert!(matches!(first_expression("a.b[c](d)`e`;"), Expression::TaggedTemplate(_)));
    assert!(matches!(first_expression("a?.b.c();"), Expression::Chain(_)));
    assert!(matches!(first_expression("new A.B(c);"), Expression::New(_)));
}

#[test]
fn test_assignment_targets() {
    assert!(matches!(first_expression("[a, b] = [b, a];"), Expression::Assignment(_)));
    assert!(matches!(first_expression("({ a, b: { c } } = o);"), Expression::Parenthesized(_)));
    script_error("a + b = c;");
    script_error("f() = 1;");
}

#[test]
fn test_arrow_functions() {
    assert!(matches!(first_expression("x => x * 2;"), Expression::Arrow(_)));
    assert!(matches!(first_expression("async (a, [b]) => {};"), Expression::Arrow(_)));
    assert!(matches!(first_expression("() => ({});"), Expression::Arrow(_)));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_names_deepest_production() {
    let message = script_error("let 1 = 2;");
    assert!(message.contains("while parsing BindingPattern at 1:5"), "{}", message);
    assert!(
        message.contains("Script > StatementListItem > LexicalDeclaration > VariableDeclarator > BindingPattern"),
        "{}",
        message
    );
}

#[test]
fn test_unterminated_string_is_lexical() {
    let err = parse_script("let s = 'abc").unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_unbalanced_brackets() {
    script_error("function f() {");
    script_error("a(b]");
}

#[test]
fn test_depth_limit_is_fatal() {
    let options = ParseOptions::default().with_max_depth(8);
    let source = format!("{}1{}", "(".repeat(16), ")".repeat(16));
    let err = parse(&source, &options).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("nesting depth limit of 8 exceeded"), "{}", err);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_module_only_syntax() {
    assert!(parse_module("import x from 'x'; export default x;").is_ok());
    assert!(parse_script("export default x;").is_err());
    assert!(parse_module("await p;").is_ok());
    assert!(parse_script("await p;").is_err());
}

#[test]
fn test_typescript_option() {
    let source = "function f(a: number): void {}";
    let options = ParseOptions::default().with_typescript(true);
    assert!(parse(source, &options).is_ok());
    assert!(parse_script(source).is_err());
}
