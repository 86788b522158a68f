//! Lexer error definitions.

use thiserror::Error;

/// A lexer error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedChar {
        span: std::ops::Range<usize>,
        line: u32,
        column: u32,
    },

    #[error("unterminated string literal")]
    UnterminatedString {
        span: std::ops::Range<usize>,
        line: u32,
        column: u32,
    },

    #[error("invalid escape sequence in string literal")]
    InvalidEscape {
        span: std::ops::Range<usize>,
        line: u32,
        column: u32,
    },

    #[error("text line must start with `# `")]
    MalformedTextLine {
        span: std::ops::Range<usize>,
        line: u32,
        column: u32,
    },
}

impl LexError {
    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            LexError::UnexpectedChar { span, .. } => span.clone(),
            LexError::UnterminatedString { span, .. } => span.clone(),
            LexError::InvalidEscape { span, .. } => span.clone(),
            LexError::MalformedTextLine { span, .. } => span.clone(),
        }
    }

    /// Get the 1-based (line, column) where this error starts.
    pub fn position(&self) -> (u32, u32) {
        match self {
            LexError::UnexpectedChar { line, column, .. }
            | LexError::UnterminatedString { line, column, .. }
            | LexError::InvalidEscape { line, column, .. }
            | LexError::MalformedTextLine { line, column, .. } => (*line, *column),
        }
    }
}
