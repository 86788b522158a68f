//! Source location tracking for AST nodes.
//!
//! Locations are reference counted: a node synthesized from another one
//! shares its location record instead of copying it, so many nodes may point
//! at one [`Position`].

use smol_str::SmolStr;
use std::fmt;
use std::rc::Rc;

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// File name, empty when reading from memory
    pub file: SmolStr,
    /// 1-based line
    pub line: u32,
    /// 1-based column, in characters
    pub column: u32,
}

impl Position {
    /// Create a new shared location.
    pub fn new(file: impl Into<SmolStr>, line: u32, column: u32) -> Loc {
        Rc::new(Self {
            file: file.into(),
            line,
            column,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

/// A shared location record.
pub type Loc = Rc<Position>;

/// A value with an associated source location.
///
/// Equality compares the values only; locations are provenance, not content.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spanned<T> {
    pub node: T,
    pub loc: Loc,
}

impl<T> Spanned<T> {
    /// Attach a location to a value.
    pub fn new(node: T, loc: Loc) -> Self {
        Self { node, loc }
    }

    /// Attach the location of `other` to a value, sharing the record.
    pub fn with_loc_of<U>(node: T, other: &Spanned<U>) -> Self {
        Self {
            node,
            loc: Rc::clone(&other.loc),
        }
    }

    /// The location attached to this value.
    pub fn loc(&self) -> &Loc {
        &self.loc
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> std::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl<T> std::ops::DerefMut for Spanned<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.node
    }
}
