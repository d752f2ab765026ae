//! Errors raised while compiling a selector.

use thiserror::Error;

/// What went wrong while compiling a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text that cannot be split into tokens, or a malformed numeric literal
    Lexical,
    /// Tokens that do not match the grammar, or trailing input
    Syntax,
    /// Numeric literal outside the representable range
    LiteralRange,
    /// ESCAPE clause that is not a single permitted character
    Escape,
}

/// A selector that failed to compile.
///
/// `token` is the text of the offending token; the end of the input is
/// reported as `end of input`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Illegal selector: '{token}': {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub token: String,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
            message: message.into(),
        }
    }

    pub fn syntax(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, token, message)
    }
}

/// Result type for selector compilation
pub type ParseResult<T> = Result<T, ParseError>;
