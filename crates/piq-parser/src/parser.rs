//! Recursive descent parser for piq.

use piq_ast::*;
use piq_lexer::literal::{self, Decoded, StringKind};
use piq_lexer::names;
use piq_lexer::{LexError, Lexer, StringLiteral, Token, TokenKind};
use smol_str::SmolStr;

use crate::error::ParseError;
use crate::expand;

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Normal reading, or verbatim reading for the pretty-printer
    pub mode: Mode,
    /// File name recorded in every location
    pub file: SmolStr,
}

impl ParserConfig {
    /// Configuration for reading text that will only be pretty-printed.
    pub fn preserve() -> Self {
        Self {
            mode: Mode::Preserve,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, file: impl Into<SmolStr>) -> Self {
        self.file = file.into();
        self
    }
}

/// Parser for piq values.
///
/// Pulls tokens from any token source and keeps a single token of
/// pushback for lookahead.
pub struct Parser<I> {
    tokens: I,
    pushback: Option<Token>,
    /// Position of the most recent token, used once the source runs dry
    last: (u32, u32),
    config: ParserConfig,
}

impl<'source> Parser<Lexer<'source>> {
    /// Create a new parser for the given source, in normal mode.
    pub fn new(source: &'source str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Create a new parser for the given source.
    pub fn with_config(source: &'source str, config: ParserConfig) -> Self {
        Self::from_tokens(Lexer::new(source), config)
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Create a parser over an existing token stream.
    pub fn from_tokens(tokens: I, config: ParserConfig) -> Self {
        Self {
            tokens,
            pushback: None,
            last: (1, 1),
            config,
        }
    }

    // ========================================================================
    // Token cursor
    // ========================================================================

    fn next_token(&mut self) -> Result<Token, ParseError> {
        if let Some(token) = self.pushback.take() {
            return Ok(token);
        }

        match self.tokens.next() {
            Some(Ok(token)) => {
                self.last = (token.line, token.column);
                Ok(token)
            }
            Some(Err(error)) => {
                let (line, column) = error.position();
                let loc = Position::new(self.config.file.clone(), line, column);
                Err(ParseError::Lex { error, loc })
            }
            None => {
                let (line, column) = self.last;
                Ok(Token::new(TokenKind::Eof, 0..0, line, column))
            }
        }
    }

    fn unread(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none(), "only one token of pushback");
        self.pushback = Some(token);
    }

    fn loc_of(&self, token: &Token) -> Loc {
        Position::new(self.config.file.clone(), token.line, token.column)
    }

    // ========================================================================
    // Top-level reading
    // ========================================================================

    /// Read one complete value, or `None` at end of input.
    ///
    /// In normal mode the value is returned with abbreviations expanded.
    pub fn read(&mut self) -> Result<Option<Ast>, ParseError> {
        match (self.read_raw()?, self.config.mode) {
            (Some(ast), Mode::Normal) => expand::expand(ast).map(Some),
            (ast, _) => Ok(ast),
        }
    }

    /// Read every remaining value.
    ///
    /// In normal mode the values are expanded as one sequence, so a control
    /// block at the top level may produce several values.
    pub fn read_all(&mut self) -> Result<Vec<Ast>, ParseError> {
        let mut values = Vec::new();
        while let Some(ast) = self.read_raw()? {
            values.push(ast);
        }
        tracing::debug!(count = values.len(), file = %self.config.file, "read all values");

        match self.config.mode {
            Mode::Normal => expand::expand_all(values),
            Mode::Preserve => Ok(values),
        }
    }

    /// Read one value without expanding it.
    fn read_raw(&mut self) -> Result<Option<Ast>, ParseError> {
        let token = self.next_token()?;
        if token.kind == TokenKind::Eof {
            self.unread(token);
            return Ok(None);
        }

        let ast = self.parse_value(token)?;
        tracing::trace!(kind = ast.node.describe(), loc = %ast.loc, "read value");
        Ok(Some(ast))
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn parse_value(&mut self, token: Token) -> Result<Ast, ParseError> {
        let loc = self.loc_of(&token);

        let kind = match token.kind {
            TokenKind::LBracket => AstKind::List(self.parse_items(&TokenKind::RBracket)?),
            TokenKind::LParen => AstKind::Control(self.parse_items(&TokenKind::RParen)?),
            TokenKind::RBracket => return Err(ParseError::UnexpectedClose { found: ']', loc }),
            TokenKind::RParen => return Err(ParseError::UnexpectedClose { found: ')', loc }),
            TokenKind::String(lit) => self.parse_string(lit, &loc)?,
            TokenKind::Word(word) => {
                if let Some(name) = word.strip_prefix('.') {
                    return self.parse_named(SmolStr::from(name), loc);
                }
                if let Some(typename) = word.strip_prefix(':') {
                    return self.parse_typed(SmolStr::from(typename), loc);
                }
                self.parse_word(word, &loc)?
            }
            TokenKind::TextLine(line) => self.parse_text(line, token.line)?,
            TokenKind::UnterminatedString => {
                let error = LexError::UnterminatedString {
                    span: token.span,
                    line: token.line,
                    column: token.column,
                };
                return Err(ParseError::Lex { error, loc });
            }
            TokenKind::Eof => return Err(ParseError::UnexpectedEof { loc }),
        };

        Ok(Spanned::new(kind, loc))
    }

    fn parse_items(&mut self, close: &TokenKind) -> Result<Vec<Ast>, ParseError> {
        let mut items = Vec::new();
        loop {
            let token = self.next_token()?;
            if &token.kind == close {
                return Ok(items);
            }
            items.push(self.parse_value(token)?);
        }
    }

    /// Read the value bound to a name or type name, if there is one.
    ///
    /// A following name, type name or closing delimiter means the name
    /// stands alone.
    fn parse_bound_value(&mut self) -> Result<Option<Ast>, ParseError> {
        let token = self.next_token()?;
        if token.kind.is_closing() || token.kind.is_name_start() || token.kind == TokenKind::Eof {
            self.unread(token);
            return Ok(None);
        }
        self.parse_value(token).map(Some)
    }

    fn parse_named(&mut self, name: SmolStr, loc: Loc) -> Result<Ast, ParseError> {
        if !names::is_valid_compound_name(&name) {
            return Err(ParseError::InvalidName {
                name: SmolStr::from(format!(".{name}")),
                loc,
            });
        }

        let kind = match self.parse_bound_value()? {
            Some(value) => AstKind::named(Spanned::new(name, Loc::clone(&loc)), value),
            None => AstKind::Name(name),
        };
        Ok(Spanned::new(kind, loc))
    }

    fn parse_typed(&mut self, typename: SmolStr, loc: Loc) -> Result<Ast, ParseError> {
        if !names::is_valid_compound_typename(&typename) {
            return Err(ParseError::InvalidTypename {
                name: SmolStr::from(format!(":{typename}")),
                loc,
            });
        }

        let kind = match self.parse_bound_value()? {
            Some(value) => AstKind::typed(Spanned::new(typename, Loc::clone(&loc)), value),
            None => AstKind::Typename(typename),
        };
        Ok(Spanned::new(kind, loc))
    }

    fn parse_string(&self, lit: StringLiteral, loc: &Loc) -> Result<AstKind, ParseError> {
        // Preserved strings keep their escapes so they print back unchanged.
        if self.config.mode == Mode::Preserve {
            return Ok(AstKind::Utf8String(lit.raw));
        }

        let decoded = literal::decode(lit.kind, &lit.raw).map_err(|error| {
            ParseError::InvalidString {
                error,
                loc: Loc::clone(loc),
            }
        })?;

        Ok(match (lit.kind, decoded) {
            (StringKind::Ascii, Decoded::Text(s)) => AstKind::AsciiString(SmolStr::from(s)),
            (_, Decoded::Text(s)) => AstKind::Utf8String(SmolStr::from(s)),
            (_, Decoded::Bytes(b)) => AstKind::Binary(b),
        })
    }

    fn parse_word(&self, word: SmolStr, loc: &Loc) -> Result<AstKind, ParseError> {
        if self.config.mode == Mode::Preserve {
            return Ok(AstKind::Word(word));
        }

        match word.as_str() {
            "true" => return Ok(AstKind::Bool(true)),
            "false" => return Ok(AstKind::Bool(false)),
            _ => {}
        }

        if looks_numeric(&word) {
            parse_number(&word, loc)
        } else {
            Ok(AstKind::Word(word))
        }
    }

    /// Join text lines that sit on directly adjacent source lines.
    fn parse_text(&mut self, first: SmolStr, first_line: u32) -> Result<AstKind, ParseError> {
        let mut text = String::from(first.as_str());
        let mut line = first_line;

        loop {
            let token = self.next_token()?;
            match &token.kind {
                TokenKind::TextLine(next) if token.line == line + 1 => {
                    text.push(LINE_SEPARATOR);
                    text.push_str(next);
                    line = token.line;
                }
                _ => {
                    self.unread(token);
                    break;
                }
            }
        }

        Ok(AstKind::Text(SmolStr::from(text)))
    }
}

// ============================================================================
// Numbers
// ============================================================================

fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

fn radix_prefix(digits: &str) -> Option<(u32, &str)> {
    [("0x", 16), ("0o", 8), ("0b", 2)]
        .iter()
        .find_map(|&(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (radix, rest)))
}

fn parse_number(word: &str, loc: &Loc) -> Result<AstKind, ParseError> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if radix_prefix(digits).is_none() && digits.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        parse_float(word, loc)
    } else {
        parse_int(word, loc)
    }
}

fn parse_int(word: &str, loc: &Loc) -> Result<AstKind, ParseError> {
    let invalid = || ParseError::InvalidInteger {
        literal: SmolStr::from(word),
        loc: Loc::clone(loc),
    };

    let (negative, digits) = match word.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, word),
    };
    let (radix, body) = radix_prefix(digits).unwrap_or((10, digits));
    let body = body.replace('_', "");
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u64::from_str_radix(&body, radix).map_err(|_| {
        if radix == 10 {
            ParseError::InvalidDecimalInteger {
                literal: SmolStr::from(word),
                loc: Loc::clone(loc),
            }
        } else {
            invalid()
        }
    })?;

    if negative {
        let value = i64::try_from(-i128::from(magnitude)).map_err(|_| invalid())?;
        Ok(AstKind::Int(value))
    } else {
        Ok(AstKind::Uint(magnitude))
    }
}

fn parse_float(word: &str, loc: &Loc) -> Result<AstKind, ParseError> {
    let value = match word {
        "0.nan" => f64::NAN,
        "0.inf" => f64::INFINITY,
        "-0.inf" => f64::NEG_INFINITY,
        _ => word.replace('_', "").parse().map_err(|_| ParseError::InvalidFloat {
            literal: SmolStr::from(word),
            loc: Loc::clone(loc),
        })?,
    };
    Ok(AstKind::Float(value))
}
