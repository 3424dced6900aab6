//! Diagnostic message catalog.
//!
//! Each entry pairs a stable numeric code with a message template. Templates
//! may contain `{0}`, `{1}`, … placeholders filled by [`format_message`].

/// A diagnostic message template with a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Render this message with its placeholders replaced by `args`.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

macro_rules! diag {
    ($code:expr, $msg:expr) => {
        DiagnosticMessage {
            code: $code,
            message: $msg,
        }
    };
}

// ========================================================================
// Scanner errors (1000-1099)
// ========================================================================
pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, "unexpected character '{0}'");
pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, "unterminated string literal");
pub const UNTERMINATED_TEMPLATE: DiagnosticMessage = diag!(1003, "unterminated template literal");
pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1004, "unterminated comment, '*/' expected");
pub const UNTERMINATED_REGEX: DiagnosticMessage = diag!(1005, "unterminated regular expression literal");
pub const INVALID_ESCAPE: DiagnosticMessage = diag!(1006, "invalid escape sequence");
pub const INVALID_NUMBER: DiagnosticMessage = diag!(1007, "invalid numeric literal");
pub const INVALID_IDENTIFIER_ESCAPE: DiagnosticMessage = diag!(1008, "invalid unicode escape in identifier");
pub const MISMATCHED_BRACKET: DiagnosticMessage = diag!(1009, "mismatched closing '{0}'");
pub const UNCLOSED_BRACKET: DiagnosticMessage = diag!(1010, "unclosed '{0}' at end of input");

// ========================================================================
// Parser errors (1100-1199)
// ========================================================================
pub const EXPECTED: DiagnosticMessage = diag!(1100, "expected {0}");
pub const INVALID_CONVERSION: DiagnosticMessage = diag!(1101, "{0}");
pub const DEPTH_EXCEEDED: DiagnosticMessage = diag!(1102, "nesting depth limit of {0} exceeded");
