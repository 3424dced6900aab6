//! rsecma_diagnostics: lexical errors, the chained parse error, and the
//! diagnostic message catalog.

pub mod error;
pub mod lexical;
pub mod messages;

pub use error::{Chain, ErrorCause, ErrorFrame, ErrorToken, ParseError};
pub use lexical::{LexicalError, LexicalErrorKind};
pub use messages::{format_message, DiagnosticMessage};
