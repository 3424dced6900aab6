//! rsecma_core: Core utilities for the rsecma ECMAScript parser.
//!
//! Provides source positions, byte spans, and token-index spans used
//! throughout the scanner, parser, and diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{Position, TextPos, TextSpan, TokenSpan};
