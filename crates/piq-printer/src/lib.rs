//! # Piq Printer
//!
//! Pretty-prints piq values.
//!
//! Values are first turned into a [`Layout`] tree of atoms, delimited lists
//! and labels, which is then rendered within a width budget. In
//! [`Mode::Preserve`] strings are printed exactly as they were read, so a
//! preserve-mode parse followed by a preserve-mode print keeps the text's
//! meaning intact.
//!
//! ## Example
//!
//! ```
//! use piq_printer::{print, Mode};
//!
//! let values = piq_parser::parse(".point [ .x 1 .y 2 ]").unwrap();
//! assert_eq!(print(&values, Mode::Normal), ".point [\n    .x 1\n    .y 2\n]\n\n");
//! ```

mod config;
pub mod layout;
mod printer;

pub use config::PrinterConfig;
pub use layout::{Layout, Renderer};
pub use piq_ast::Mode;
pub use printer::{format_float, format_uint, Printer};

use piq_ast::Ast;

/// Print top-level values with the default width and indentation.
pub fn print(values: &[Ast], mode: Mode) -> String {
    let config = PrinterConfig {
        mode,
        ..PrinterConfig::default()
    };
    Printer::new(config).print(values)
}
