//! CLI commands.

pub mod check;
pub mod expand;
pub mod format;
pub mod lex;
pub mod parse;

use piq_parser::ParseError;
use piq_printer::PrinterConfig;
use std::fs;
use std::path::Path;

/// Read a source file.
pub fn read_source(file: &Path) -> miette::Result<String> {
    fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))
}

/// Printer configuration from the environment, with an optional width
/// override from the command line.
pub fn printer_config(width: Option<usize>) -> PrinterConfig {
    let config = PrinterConfig::from_env();
    match width {
        Some(width) => config.with_width(width),
        None => config,
    }
}

/// Print a parse error with the offending source line.
pub fn report(source: &str, err: &ParseError) {
    let loc = err.loc();
    println!("  error: {}", err);
    println!("   --> {}", loc);
    println!("    |");
    print_source_line(source, loc.line as usize);
    println!("    |");
}

fn print_source_line(source: &str, line_num: usize) {
    if let Some(line) = line_num.checked_sub(1).and_then(|n| source.lines().nth(n)) {
        println!("{:4} | {}", line_num, line);
    }
}
