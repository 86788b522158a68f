//! Format command - reformat a file, keeping literals and abbreviations.

use super::{printer_config, read_source, report};
use piq_parser::{parse_with, ParserConfig};
use piq_printer::Printer;
use std::fs;
use std::path::Path;

pub fn run(file: &Path, width: Option<usize>, in_place: bool) -> miette::Result<()> {
    let source = read_source(file)?;
    let config = ParserConfig::preserve().with_file(file.display().to_string());

    let values = parse_with(&source, config).map_err(|err| {
        report(&source, &err);
        miette::miette!("format failed")
    })?;

    let printer = Printer::new(printer_config(width).preserve());
    let output = printer.print(&values);

    if in_place {
        if output != source {
            fs::write(file, &output)
                .map_err(|e| miette::miette!("Failed to write {}: {}", file.display(), e))?;
            tracing::debug!(file = %file.display(), "reformatted");
        }
    } else {
        print!("{}", output);
    }
    Ok(())
}
