//! Parser configuration.

use rsecma_ast::SourceType;
use serde::{Deserialize, Serialize};

/// Default nesting limit for statements, expressions, patterns and types.
/// Input at this depth parses on a 2 MB thread stack; raising the limit
/// needs a larger stack to match.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Options controlling which grammar a parse uses.
///
/// Deserializes from JSON with every field optional:
/// `{"source_type": "module", "typescript": true, "max_depth": 500}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub source_type: SourceType,
    /// Accept and discard TypeScript-only syntax.
    pub typescript: bool,
    pub max_depth: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Script,
            typescript: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn module(self) -> Self {
        self.with_source_type(SourceType::Module)
    }

    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }
}
