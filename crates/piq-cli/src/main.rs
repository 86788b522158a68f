//! Piq CLI - Command-line interface for the piq notation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Piq - A readable notation for structured data
#[derive(Parser)]
#[command(name = "piq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a piq file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
    },

    /// Parse a piq file and show the AST
    Parse {
        /// Input file
        file: PathBuf,
        /// Keep literals and abbreviations as written
        #[arg(long)]
        raw: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand abbreviations and print the result
    Expand {
        /// Input file
        file: PathBuf,
        /// Line width (default: PIQ_WIDTH or 80)
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Reformat a piq file without changing its content
    Format {
        /// Input file
        file: PathBuf,
        /// Line width (default: PIQ_WIDTH or 80)
        #[arg(short, long)]
        width: Option<usize>,
        /// Overwrite the file instead of printing to stdout
        #[arg(long)]
        in_place: bool,
    },

    /// Check piq files for errors
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Lex { file } => commands::lex::run(&file),
        Commands::Parse { file, raw, json } => commands::parse::run(&file, raw, json),
        Commands::Expand { file, width } => commands::expand::run(&file, width),
        Commands::Format {
            file,
            width,
            in_place,
        } => commands::format::run(&file, width, in_place),
        Commands::Check { files } => commands::check::run(&files),
    }
}
