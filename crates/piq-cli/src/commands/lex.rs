//! Lex command - tokenize a file.

use super::read_source;
use piq_lexer::Lexer;
use std::path::Path;

pub fn run(file: &Path) -> miette::Result<()> {
    let source = read_source(file)?;

    println!("Tokenizing: {}\n", file.display());

    let lexer = Lexer::new(&source);
    let mut token_count = 0;
    let mut error_count = 0;

    for result in lexer {
        match result {
            Ok(token) => {
                let text = &source[token.span.clone()];
                let text_display = if text.chars().count() > 40 {
                    format!("{}...", text.chars().take(40).collect::<String>())
                } else {
                    text.to_string()
                };

                println!(
                    "{:>4}:{:<4}  {:20}  {:?}",
                    token.line,
                    token.column,
                    format!("{:?}", token.kind).chars().take(20).collect::<String>(),
                    text_display
                );
                token_count += 1;
            }
            Err(err) => {
                let (line, column) = err.position();
                println!("ERROR at {}:{}: {}", line, column, err);
                error_count += 1;
            }
        }
    }

    println!("\n{} tokens, {} errors", token_count, error_count);

    if error_count > 0 {
        Err(miette::miette!("{} lexer errors", error_count))
    } else {
        Ok(())
    }
}
