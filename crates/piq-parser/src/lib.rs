//! # Piq Parser
//!
//! Parses piq text into an Abstract Syntax Tree.
//!
//! Uses recursive descent over the token stream, then expands abbreviations
//! (control blocks and compound names) unless reading in preserve mode.
//!
//! ## Example
//!
//! ```
//! use piq_parser::parse;
//!
//! let source = r#"
//!     .point [ .x 1 .y 2 ]
//!     (.tag "a" "b")
//! "#;
//!
//! let values = parse(source).unwrap();
//! assert_eq!(values.len(), 3);
//! ```

mod error;
pub mod expand;
mod parser;

pub use error::ParseError;
pub use parser::{Parser, ParserConfig};

use piq_ast::Ast;

/// Parse source text into expanded values.
pub fn parse(source: &str) -> Result<Vec<Ast>, ParseError> {
    Parser::new(source).read_all()
}

/// Parse source text with the given configuration.
pub fn parse_with(source: &str, config: ParserConfig) -> Result<Vec<Ast>, ParseError> {
    Parser::with_config(source, config).read_all()
}
