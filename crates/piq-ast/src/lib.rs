//! # Piq AST
//!
//! Abstract Syntax Tree definitions for the piq notation.
//!
//! The AST represents piq text after parsing and, unless it was read in
//! [`Mode::Preserve`], after abbreviation expansion. Every node carries a
//! shared source location for error reporting.

mod ast;
mod span;

pub use ast::*;
pub use span::{Loc, Position, Spanned};

/// How literals and abbreviations are treated while reading and printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    /// Interpret literals and expand abbreviations.
    #[default]
    Normal,
    /// Keep the text as written so it can be printed back losslessly.
    Preserve,
}
