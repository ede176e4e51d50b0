//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dwca: Darwin Core Archive inspection tool
#[derive(Parser)]
#[command(name = "dwca")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the archive layout: row types, file locations, field bindings
    Inspect {
        /// Path to the expanded archive directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the leading rows of a described data file
    Head {
        /// Path to the expanded archive directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Read the Nth extension file instead of the core (zero-based)
        #[arg(short, long, value_name = "N")]
        extension: Option<usize>,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,

        /// Skip the declared header lines before printing
        #[arg(long)]
        skip_headers: bool,
    },
}
