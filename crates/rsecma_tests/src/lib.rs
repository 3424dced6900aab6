//! Shared helpers for the cross-crate test suites.
//!
//! The suites under `tests/` exercise the scanner and parser together:
//! lossless round-trips, span structure, grammar ambiguities, error chains
//! and TypeScript erasure.

use rsecma_ast::{Program, Visit};
use rsecma_core::TokenSpan;
use rsecma_parser::{parse, ParseOptions};
use std::thread;

/// Stack for test threads that parse deeply nested input.
pub const DEEP_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Checks that every node's span lies inside its parent's and that siblings
/// appear in order without overlapping.
#[derive(Debug, Default)]
pub struct SpanChecker {
    stack: Vec<Frame>,
    pub violations: Vec<String>,
    pub nodes: usize,
}

#[derive(Debug)]
struct Frame {
    name: &'static str,
    span: TokenSpan,
    /// End of the last child seen so far.
    cursor: u32,
}

fn show(span: TokenSpan) -> String {
    format!("{}..{}", span.start, span.end)
}

impl<'src> Visit<'src> for SpanChecker {
    fn enter_node(&mut self, name: &'static str, span: TokenSpan) {
        self.nodes += 1;
        if span.start > span.end {
            self.violations.push(format!("{} has inverted span {}", name, show(span)));
        }
        if let Some(parent) = self.stack.last_mut() {
            if span.start < parent.span.start || span.end > parent.span.end {
                self.violations.push(format!(
                    "{} {} escapes {} {}",
                    name,
                    show(span),
                    parent.name,
                    show(parent.span)
                ));
            }
            if span.start < parent.cursor {
                self.violations.push(format!(
                    "{} {} overlaps an earlier sibling inside {} {}",
                    name,
                    show(span),
                    parent.name,
                    show(parent.span)
                ));
            }
            parent.cursor = parent.cursor.max(span.end);
        }
        self.stack.push(Frame {
            name,
            span,
            cursor: span.start,
        });
    }

    fn leave_node(&mut self, _name: &'static str, _span: TokenSpan) {
        self.stack.pop();
    }
}

/// Span violations in `program`, empty when the tree is well formed.
pub fn span_violations(program: &Program<'_>) -> Vec<String> {
    let mut checker = SpanChecker::default();
    checker.visit_program(program);
    checker.violations
}

/// The source rebuilt from the raw text of every token.
pub fn reconstruct(program: &Program<'_>) -> String {
    program.tokens.tokens().iter().map(|t| t.raw).collect()
}

/// Source text of a node.
pub fn text_of<'src>(program: &Program<'src>, span: TokenSpan) -> &'src str {
    program.tokens.text_of(span)
}

/// Parse and panic with the rendered error on failure.
pub fn parse_ok<'src>(source: &'src str, options: &ParseOptions) -> Program<'src> {
    match parse(source, options) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    }
}

/// Run `f` on a thread with a [`DEEP_STACK_SIZE`] stack.
pub fn with_deep_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    let handle = match thread::Builder::new().stack_size(DEEP_STACK_SIZE).spawn(f) {
        Ok(handle) => handle,
        Err(err) => panic!("cannot spawn test thread: {}", err),
    };
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
