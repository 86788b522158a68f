//! Parse command - parse a file and show the AST.

use super::{read_source, report};
use piq_ast::{Ast, AstKind};
use piq_lexer::literal::escape_bytes;
use piq_parser::{parse_with, ParserConfig};
use std::path::Path;

pub fn run(file: &Path, raw: bool, json: bool) -> miette::Result<()> {
    let source = read_source(file)?;

    let config = if raw {
        ParserConfig::preserve()
    } else {
        ParserConfig::default()
    };
    let config = config.with_file(file.display().to_string());

    let values = match parse_with(&source, config) {
        Ok(values) => values,
        Err(err) => {
            report(&source, &err);
            return Err(miette::miette!("parse failed"));
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&values)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Parsing: {}\n", file.display());
    for value in &values {
        print_value(value, 0);
    }
    println!("\n{} values", values.len());

    Ok(())
}

fn print_value(ast: &Ast, indent: usize) {
    let prefix = "  ".repeat(indent);
    let kind = ast.node.describe();

    match &ast.node {
        AstKind::Named(named) => {
            println!("{}{} .{}  @ {}", prefix, kind, named.name.node, ast.loc());
            print_value(&named.value, indent + 1);
        }
        AstKind::Typed(typed) => {
            println!("{}{} :{}  @ {}", prefix, kind, typed.typename.node, ast.loc());
            print_value(&typed.value.ast, indent + 1);
        }
        AstKind::List(items) | AstKind::Control(items) => {
            println!("{}{} ({} items)  @ {}", prefix, kind, items.len(), ast.loc());
            for item in items {
                print_value(item, indent + 1);
            }
        }
        scalar => {
            println!("{}{} {}  @ {}", prefix, kind, scalar_text(scalar), ast.loc());
        }
    }
}

fn scalar_text(kind: &AstKind) -> String {
    match kind {
        AstKind::Int(i) => i.to_string(),
        AstKind::Uint(u) => u.to_string(),
        AstKind::Float(f) => f.to_string(),
        AstKind::Bool(b) => b.to_string(),
        AstKind::AsciiString(s) | AstKind::Utf8String(s) | AstKind::Text(s) => format!("{:?}", s),
        AstKind::Binary(bytes) => format!("\"{}\"", escape_bytes(bytes)),
        AstKind::Word(s) | AstKind::Name(s) | AstKind::Typename(s) => s.to_string(),
        _ => String::new(),
    }
}
