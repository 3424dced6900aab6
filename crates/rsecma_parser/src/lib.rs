//! rsecma_parser: backtracking recursive-descent parser for ECMAScript.
//!
//! Parses the scanner's token buffer into an [`rsecma_ast::Program`].
//! Productions try alternatives on child cursors and report the failure
//! that got furthest, as a chain of the productions it occurred in. An
//! optional TypeScript layer accepts and erases type syntax.

mod classes;
mod context;
mod cursor;
mod expressions;
mod functions;
mod modules;
mod options;
mod parser;
mod patterns;
mod precedence;
mod statements;
mod typescript;

pub use context::Context;
pub use cursor::Goal;
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{PResult, Parser};

use rsecma_ast::{Program, SourceType};
use rsecma_diagnostics::ParseError;
use tracing::debug;

/// Tokenize and parse `text` with the given options.
pub fn parse<'src>(text: &'src str, options: &ParseOptions) -> Result<Program<'src>, ParseError> {
    let tokens = rsecma_scanner::tokenize(text)?;
    let body = {
        let mut parser = Parser::new(tokens.tokens(), *options);
        let mut root = parser.root();
        parser.parse_program(&mut root)?
    };
    debug!(
        tokens = tokens.len(),
        statements = body.len(),
        module = options.is_module(),
        typescript = options.typescript,
        "parsed program"
    );
    Ok(Program {
        span: tokens.full_span(),
        source_type: options.source_type,
        body,
        tokens,
    })
}

pub fn parse_script(text: &str) -> Result<Program<'_>, ParseError> {
    parse(text, &ParseOptions::default())
}

pub fn parse_module(text: &str) -> Result<Program<'_>, ParseError> {
    parse(text, &ParseOptions::default().with_source_type(SourceType::Module))
}

pub fn parse_script_typescript(text: &str) -> Result<Program<'_>, ParseError> {
    parse(text, &ParseOptions::default().with_typescript(true))
}

pub fn parse_module_typescript(text: &str) -> Result<Program<'_>, ParseError> {
    parse(text, &ParseOptions::default().module().with_typescript(true))
}
