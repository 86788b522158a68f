//! # Piq Lexer
//!
//! Tokenizes piq text into a stream of tokens, and provides the string
//! literal and name rules shared by the parser and the printer.
//!
//! The lexer uses the `logos` crate for fast, zero-copy tokenization.
//!
//! ## Example
//!
//! ```
//! use piq_lexer::{Lexer, TokenKind};
//!
//! let source = ".point [ .x 1 .y 2 ]";
//! let lexer = Lexer::new(source);
//!
//! for token in lexer {
//!     println!("{:?}", token);
//! }
//! ```

mod error;
mod lexer;
mod token;

pub mod literal;
pub mod names;

pub use error::LexError;
pub use lexer::Lexer;
pub use literal::StringKind;
pub use token::{StringLiteral, Token, TokenKind};

/// Tokenize source code into a vector of tokens.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in lexer {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    (tokens, errors)
}
