#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod diagnostic;
mod logging;

use clap::Parser;
use miette::Result;
use sable_parser::parser::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sable")]
#[command(author, version, about = "Parse, check and pretty-print JavaScript", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Parse input as an ECMAScript module (implied for .mjs files)
    #[arg(long, global = true)]
    module: bool,

    /// Treat script input as strict mode code
    #[arg(long, global = true)]
    strict: bool,

    /// Maximum nesting depth before parsing gives up
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, env = "SABLE_MAX_DEPTH")]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a file and summarize the tree
    Parse {
        /// Source file, or `-` for stdin
        file: PathBuf,

        /// Include the full syntax tree in the JSON report
        #[arg(long)]
        ast: bool,
    },

    /// Parse a file and print it back in canonical form
    Print {
        /// Source file, or `-` for stdin
        file: PathBuf,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// Report every syntax error in the given files
    Check {
        /// Source files, or `-` for stdin
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    let flags = commands::ParseFlags { module: cli.module, strict: cli.strict, max_depth: cli.max_depth };

    let clean = match cli.command {
        Commands::Parse { file, ast } => commands::parse::run(&file, flags, ast, cli.json)?,
        Commands::Print { file, indent } => commands::print::run(&file, flags, indent)?,
        Commands::Check { files } => commands::check::run(&files, flags, cli.json)?,
    };

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
