//! Expand command - expand abbreviations and print the result.

use super::{printer_config, read_source, report};
use piq_parser::{parse_with, ParserConfig};
use piq_printer::Printer;
use std::path::Path;

pub fn run(file: &Path, width: Option<usize>) -> miette::Result<()> {
    let source = read_source(file)?;
    let config = ParserConfig::default().with_file(file.display().to_string());

    let values = parse_with(&source, config).map_err(|err| {
        report(&source, &err);
        miette::miette!("expansion failed")
    })?;

    let printer = Printer::new(printer_config(width));
    print!("{}", printer.print(&values));
    Ok(())
}
