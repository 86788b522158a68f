//! Parser error definitions.

use piq_ast::Loc;
use piq_lexer::literal::LiteralError;
use piq_lexer::LexError;
use smol_str::SmolStr;
use thiserror::Error;

/// A parser or expander error.
///
/// Errors are fatal for the value being read; every variant carries the
/// location it was detected at.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("{error}")]
    Lex { error: LexError, loc: Loc },

    #[error("unexpected `{found}`")]
    UnexpectedClose { found: char, loc: Loc },

    #[error("unexpected end of file")]
    UnexpectedEof { loc: Loc },

    #[error("invalid name: {name}")]
    InvalidName { name: SmolStr, loc: Loc },

    #[error("invalid type name: {name}")]
    InvalidTypename { name: SmolStr, loc: Loc },

    #[error("invalid integer literal: {literal}")]
    InvalidInteger { literal: SmolStr, loc: Loc },

    #[error("invalid decimal integer literal: {literal}")]
    InvalidDecimalInteger { literal: SmolStr, loc: Loc },

    #[error("invalid floating point literal: {literal}")]
    InvalidFloat { literal: SmolStr, loc: Loc },

    #[error("invalid string literal: {error}")]
    InvalidString { error: LiteralError, loc: Loc },

    #[error("empty control block is invalid")]
    EmptyControl { loc: Loc },

    #[error("control expansion is allowed only in lists")]
    ControlOutsideList { loc: Loc },

    #[error("unsupported format of control block")]
    UnsupportedControl { loc: Loc },
}

impl ParseError {
    /// Get the location of this error.
    pub fn loc(&self) -> &Loc {
        match self {
            ParseError::Lex { loc, .. } => loc,
            ParseError::UnexpectedClose { loc, .. } => loc,
            ParseError::UnexpectedEof { loc } => loc,
            ParseError::InvalidName { loc, .. } => loc,
            ParseError::InvalidTypename { loc, .. } => loc,
            ParseError::InvalidInteger { loc, .. } => loc,
            ParseError::InvalidDecimalInteger { loc, .. } => loc,
            ParseError::InvalidFloat { loc, .. } => loc,
            ParseError::InvalidString { loc, .. } => loc,
            ParseError::EmptyControl { loc } => loc,
            ParseError::ControlOutsideList { loc } => loc,
            ParseError::UnsupportedControl { loc } => loc,
        }
    }
}
