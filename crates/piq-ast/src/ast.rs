//! AST node definitions for piq.

use crate::{Loc, Spanned};
use smol_str::SmolStr;

/// A piq value.
pub type Ast = Spanned<AstKind>;

/// The line separator joining the lines of a [`AstKind::Text`] scalar.
pub const LINE_SEPARATOR: char = '\n';

/// Equality is structural. Floats compare by bit pattern, so `0.nan` equals
/// itself and `0.0` differs from `-0.0`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AstKind {
    /// Negative integer literal: `-42`
    Int(i64),
    /// Non-negative integer literal: `42`, `0xff`
    Uint(u64),
    /// Floating point literal: `1.5`, `0.nan`, `-0.inf`
    Float(f64),
    /// `true` or `false`
    Bool(bool),
    /// String literal holding only ASCII characters
    AsciiString(SmolStr),
    /// String literal holding arbitrary Unicode text
    Utf8String(SmolStr),
    /// String literal holding bytes that are not valid UTF-8
    Binary(Vec<u8>),
    /// Bare word that is neither a number nor a boolean
    Word(SmolStr),
    /// Lines of `# ...` text, joined by [`LINE_SEPARATOR`]
    Text(SmolStr),
    /// Bare name: `.foo`
    Name(SmolStr),
    /// Bare type name: `:foo`
    Typename(SmolStr),
    /// Name bound to a value: `.foo 1`
    Named(Named),
    /// Type name bound to a value: `:int 1`
    Typed(Typed),
    /// `[ ... ]`
    List(Vec<Ast>),
    /// `( ... )`, only present before abbreviation expansion
    Control(Vec<Ast>),
}

impl PartialEq for AstKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AstKind::Int(a), AstKind::Int(b)) => a == b,
            (AstKind::Uint(a), AstKind::Uint(b)) => a == b,
            (AstKind::Float(a), AstKind::Float(b)) => a.to_bits() == b.to_bits(),
            (AstKind::Bool(a), AstKind::Bool(b)) => a == b,
            (AstKind::AsciiString(a), AstKind::AsciiString(b)) => a == b,
            (AstKind::Utf8String(a), AstKind::Utf8String(b)) => a == b,
            (AstKind::Binary(a), AstKind::Binary(b)) => a == b,
            (AstKind::Word(a), AstKind::Word(b)) => a == b,
            (AstKind::Text(a), AstKind::Text(b)) => a == b,
            (AstKind::Name(a), AstKind::Name(b)) => a == b,
            (AstKind::Typename(a), AstKind::Typename(b)) => a == b,
            (AstKind::Named(a), AstKind::Named(b)) => a == b,
            (AstKind::Typed(a), AstKind::Typed(b)) => a == b,
            (AstKind::List(a), AstKind::List(b)) => a == b,
            (AstKind::Control(a), AstKind::Control(b)) => a == b,
            _ => false,
        }
    }
}

/// A name bound to a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Named {
    pub name: Spanned<SmolStr>,
    pub value: Box<Ast>,
}

/// A type name bound to a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Typed {
    pub typename: Spanned<SmolStr>,
    pub value: Box<AnyValue>,
}

/// A value of statically unknown type, as carried by a typed pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnyValue {
    pub ast: Ast,
}

impl AnyValue {
    pub fn new(ast: Ast) -> Self {
        Self { ast }
    }
}

impl AstKind {
    /// Build a named pair.
    pub fn named(name: Spanned<SmolStr>, value: Ast) -> Self {
        AstKind::Named(Named {
            name,
            value: Box::new(value),
        })
    }

    /// Build a typed pair.
    pub fn typed(typename: Spanned<SmolStr>, value: Ast) -> Self {
        AstKind::Typed(Typed {
            typename,
            value: Box::new(AnyValue::new(value)),
        })
    }

    /// Short description of the node kind, for diagnostics and tree dumps.
    pub fn describe(&self) -> &'static str {
        match self {
            AstKind::Int(_) => "int",
            AstKind::Uint(_) => "uint",
            AstKind::Float(_) => "float",
            AstKind::Bool(_) => "bool",
            AstKind::AsciiString(_) => "ascii-string",
            AstKind::Utf8String(_) => "utf8-string",
            AstKind::Binary(_) => "binary",
            AstKind::Word(_) => "word",
            AstKind::Text(_) => "text",
            AstKind::Name(_) => "name",
            AstKind::Typename(_) => "typename",
            AstKind::Named(_) => "named",
            AstKind::Typed(_) => "typed",
            AstKind::List(_) => "list",
            AstKind::Control(_) => "control",
        }
    }
}

/// Helper for building nodes that share a location.
pub fn at(loc: &Loc, kind: AstKind) -> Ast {
    Spanned::new(kind, Loc::clone(loc))
}

/// Count the `control` nodes left in a tree.
pub fn count_controls(ast: &Ast) -> usize {
    match &ast.node {
        AstKind::Control(items) => 1 + items.iter().map(count_controls).sum::<usize>(),
        AstKind::List(items) => items.iter().map(count_controls).sum(),
        AstKind::Named(named) => count_controls(&named.value),
        AstKind::Typed(typed) => count_controls(&typed.value.ast),
        _ => 0,
    }
}
