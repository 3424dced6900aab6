//! Rendering parse errors against their source with miette.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use rsecma_diagnostics::{ErrorCause, ParseError};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("[E{code}] {message}")]
#[diagnostic(code(rsecma::syntax))]
pub struct SyntaxDiagnostic {
    code: u32,
    message: String,
    #[source_code]
    text: NamedSource<String>,
    #[label(collection)]
    labels: Vec<LabeledSpan>,
    #[help]
    help: Option<String>,
}

impl SyntaxDiagnostic {
    pub fn new(path: &str, text: &str, err: &ParseError) -> Self {
        let token = err.token();
        let span = SourceSpan::from((token.pos.offset as usize, token.len as usize));
        let label = match err.root_cause() {
            ErrorCause::Lexical(_) => "invalid token",
            ErrorCause::DepthExceeded { .. } => "nested too deeply",
            _ => "unexpected here",
        };
        let productions = err.productions();
        let help = (!productions.is_empty())
            .then(|| format!("while parsing {}", productions.join(" > ")));
        Self {
            code: err.code(),
            message: err.message(),
            text: NamedSource::new(path, text.to_string()),
            labels: vec![LabeledSpan::new_with_span(Some(label.to_string()), span)],
            help,
        }
    }
}
