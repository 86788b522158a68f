//! Check command - check files for errors.

use super::{read_source, report};
use piq_parser::{parse_with, ParserConfig};
use std::path::{Path, PathBuf};

pub fn run(files: &[PathBuf]) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut failed = 0;
    for file in files {
        if !check_file(file)? {
            failed += 1;
        }
    }

    println!();
    if failed > 0 {
        println!("Check complete: {} file(s) with errors", failed);
        Err(miette::miette!("{} files failed", failed))
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path) -> miette::Result<bool> {
    let source = read_source(file)?;

    println!("Checking: {}", file.display());

    let config = ParserConfig::default().with_file(file.display().to_string());
    match parse_with(&source, config) {
        Ok(values) => {
            println!("  ok ({} values)", values.len());
            Ok(true)
        }
        Err(err) => {
            report(&source, &err);
            Ok(false)
        }
    }
}
