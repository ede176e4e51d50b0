//! dwca CLI - inspect and read Darwin Core Archives.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { dir, json } => commands::inspect::run(dir, json, cli.verbose),

        Commands::Head {
            dir,
            extension,
            rows,
            skip_headers,
        } => commands::head::run(dir, extension, rows, skip_headers, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
