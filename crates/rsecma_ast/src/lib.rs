//! rsecma_ast: token kinds, tokens, and the syntax tree for ECMAScript.
//!
//! The tree uses tagged sum types throughout, one variant per grammar
//! alternative, and every node records the token span it was built from.

pub mod convert;
pub mod node;
pub mod token;
pub mod token_kind;
pub mod visitor;

// Re-export key types
pub use convert::{ConversionError, CoverItem, CoverParenthesized};
pub use node::*;
pub use token::{Token, TokenBuffer};
pub use token_kind::TokenKind;
pub use visitor::Visit;
