//! Token definitions for piq.

use logos::Logos;
use smol_str::SmolStr;

use crate::literal::{self, StringKind};

/// A token with its kind, byte span and 1-based line/column.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            line,
            column,
        }
    }
}

/// A string literal as it appears in the source: still escaped, without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub kind: StringKind,
    pub raw: SmolStr,
}

/// Token kinds for piq.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"%[^\n]*")]
pub enum TokenKind {
    // ========================================================================
    // Delimiters
    // ========================================================================
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // ========================================================================
    // Literals
    // ========================================================================
    /// String literal
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| string_literal(lex.slice()))]
    String(StringLiteral),

    /// A string literal missing its closing quote
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    /// One line of a text block: `# content`
    #[regex(r"#[^\n]*", |lex| text_line(lex.slice()))]
    TextLine(SmolStr),

    /// Any other bare token: names, type names, numbers, keywords
    #[regex(r##"[^\s\[\]()"#%][^\s\[\]()"]*"##, |lex| SmolStr::from(lex.slice()))]
    Word(SmolStr),

    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token closes a bracketed construct.
    pub fn is_closing(&self) -> bool {
        matches!(self, TokenKind::RBracket | TokenKind::RParen)
    }

    /// Check if this token starts a name (`.foo`) or a type name (`:foo`).
    pub fn is_name_start(&self) -> bool {
        matches!(self, TokenKind::Word(w) if w.starts_with('.') || w.starts_with(':'))
    }
}

// ============================================================================
// Helper functions for lexing
// ============================================================================

fn string_literal(s: &str) -> Option<StringLiteral> {
    let raw = s.strip_prefix('"')?.strip_suffix('"')?;
    let bytes = literal::unescape(raw).ok()?;
    Some(StringLiteral {
        kind: literal::classify(&bytes),
        raw: SmolStr::from(raw),
    })
}

fn text_line(s: &str) -> Option<SmolStr> {
    let rest = s.strip_prefix('#')?;
    let rest = rest.strip_suffix('\r').unwrap_or(rest);
    if rest.is_empty() {
        Some(SmolStr::default())
    } else {
        rest.strip_prefix(' ').map(SmolStr::from)
    }
}
