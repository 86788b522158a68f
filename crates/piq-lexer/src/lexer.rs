//! High-level lexer interface.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use logos::Logos;

/// A lexer for piq source text.
///
/// Wraps the logos-generated lexer, resolves byte offsets to line/column
/// positions and terminates the stream with a single `Eof` token.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
    /// Track if we've emitted EOF
    done: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            inner: TokenKind::lexer(source),
            line_starts,
            done: false,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    /// Resolve a byte offset into a 1-based (line, column) pair.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = self.source()[line_start..offset].chars().count() + 1;
        (line as u32, column as u32)
    }

    fn token(&self, kind: TokenKind, span: std::ops::Range<usize>) -> Token {
        let (line, column) = self.line_col(span.start);
        Token::new(kind, span, line, column)
    }

    fn next_inner(&mut self) -> Option<Result<Token, LexError>> {
        match self.inner.next() {
            Some(Ok(TokenKind::UnterminatedString)) => {
                let span = self.inner.span();
                let (line, column) = self.line_col(span.start);
                Some(Err(LexError::UnterminatedString { span, line, column }))
            }
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Some(Ok(self.token(kind, span)))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                let (line, column) = self.line_col(span.start);
                let err = match self.inner.slice().chars().next() {
                    Some('"') => LexError::InvalidEscape { span, line, column },
                    Some('#') => LexError::MalformedTextLine { span, line, column },
                    _ => LexError::UnexpectedChar { span, line, column },
                };
                Some(Err(err))
            }
            None => {
                if !self.done {
                    self.done = true;
                    let pos = self.source().len();
                    return Some(Ok(self.token(TokenKind::Eof, pos..pos)));
                }
                None
            }
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_inner()
    }
}
