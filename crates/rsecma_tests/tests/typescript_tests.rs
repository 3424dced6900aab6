//! The TypeScript layer: annotations tolerated, type-only syntax erased, and
//! plain JavaScript unaffected when it is off.

use rsecma_ast::*;
use rsecma_parser::{parse, parse_module_typescript, parse_script, parse_script_typescript, ParseOptions};
use rsecma_tests::{reconstruct, span_violations, text_of};

#[test]
fn test_annotated_function_needs_typescript() {
    let source = "function f(a: number): void {}";
    let program = parse_script_typescript(source).unwrap();
    match &program.body[0] {
        Statement::Function(f) => {
            assert_eq!(f.params.items.len(), 1);
            // The annotation belongs to the declaration's span.
            assert_eq!(text_of(&program, f.span()), source);
        }
        other => panic!("expected function, got {:?}", other),
    }
    assert!(parse_script(source).is_err());
}

#[test]
fn test_erased_statements_keep_their_text() {
    let source = "interface A { x: number }\ntype B = A[];\nlet c: B = [];";
    let program = parse_script_typescript(source).unwrap();
    assert_eq!(program.body.len(), 3);
    assert!(matches!(program.body[0], Statement::Erased(_)));
    assert!(matches!(program.body[1], Statement::Erased(_)));
    assert!(matches!(program.body[2], Statement::Variable(_)));
    assert_eq!(text_of(&program, program.body[1].span()), "\ntype B = A[];");
    assert_eq!(reconstruct(&program), source);
    assert!(span_violations(&program).is_empty());
}

#[test]
fn test_class_members_with_modifiers() {
    let source = "abstract class Shape<T> implements Drawable {\n\
                  \x20 protected abstract area(): number;\n\
                  \x20 private static readonly count?: number = 0;\n\
                  \x20 declare name: string;\n\
                  \x20 [key: string]: unknown;\n\
                  \x20 constructor(public readonly id: T, override x?: number) { super(); }\n\
                  \x20 get size(): number { return 0; }\n\
                  }";
    let program = parse_script_typescript(source).unwrap();
    assert!(matches!(program.body[0], Statement::Class(_)));
    assert!(span_violations(&program).is_empty());
}

#[test]
fn test_optional_and_definite_bindings() {
    assert!(parse_script_typescript("let a!: number;\nfunction f(b?: string, ...c: number[]) {}").is_ok());
    assert!(parse_script_typescript("const g = (x?: number): x is 1 => true;").is_ok());
}

#[test]
fn test_type_arguments_on_calls_and_new() {
    for source in [
        "f<T>(x);",
        "new Map<string, number[]>();",
        "a.b<C>(d)<E>(f);",
        "tag<T>`x`;",
        "const p = Promise.resolve<void>(undefined);",
    ] {
        assert!(parse_script_typescript(source).is_ok(), "{}", source);
    }
}

#[test]
fn test_comparisons_are_not_type_arguments() {
    let program = parse_script_typescript("x = a < b;\ny = c < d > (e);").unwrap();
    assert_eq!(program.body.len(), 2);
    assert!(parse_script_typescript("if (a < b && c > d) {}").is_ok());
}

#[test]
fn test_module_syntax_with_types() {
    let source = "import type { A } from './a';\n\
                  import { type B, c } from './b';\n\
                  export type { A };\n\
                  export interface I {}\n\
                  export default interface J {}\n\
                  export = c;";
    let program = parse_module_typescript(source).unwrap();
    assert_eq!(program.body.len(), 6);
    assert!(matches!(program.body[0], Statement::Erased(_)));
    assert!(matches!(program.body[1], Statement::Import(_)));
    assert!(program.body[2..].iter().all(|s| matches!(s, Statement::Erased(_))));
}

#[test]
fn test_typescript_option_is_off_by_default() {
    let options = ParseOptions::default();
    assert!(!options.typescript);
    assert!(parse("let v = x as T;", &options).is_err());
    assert!(parse("let v = x as T;", &options.with_typescript(true)).is_ok());
}

#[test]
fn test_javascript_is_unchanged_under_typescript() {
    // Contextual TypeScript words remain ordinary identifiers.
    for source in [
        "var type = 1, as = 2, satisfies = 3, readonly = 4;",
        "let keyof = declare + abstract;",
        "a ? (b) : c;",
    ] {
        assert!(parse_script(source).is_ok(), "{}", source);
        assert!(parse_script_typescript(source).is_ok(), "{}", source);
    }
}
