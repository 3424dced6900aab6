//! rsecma_scanner: ECMAScript lexer.
//!
//! Produces the complete token sequence of a source text, trivia included,
//! with support for:
//! - Regex versus division disambiguation from the preceding token
//! - Template literals with arbitrarily nested substitutions
//! - Bracket balancing, checked while scanning
//! - Unicode identifiers and identifier escapes

mod annotator;
pub mod char_codes;
mod scanner;

pub use scanner::{ScanError, Scanner};

use rsecma_ast::TokenBuffer;
use rsecma_diagnostics::LexicalError;

/// Tokenize a complete source text.
///
/// Concatenating the raw text of the returned tokens reproduces `text`
/// exactly.
pub fn tokenize(text: &str) -> Result<TokenBuffer<'_>, LexicalError> {
    annotator::annotate(text)
}
