//! Head command - print the leading rows of a data file.

use std::path::PathBuf;

use colored::Colorize;
use dwca::Archive;

pub fn run(
    dir: PathBuf,
    extension: Option<usize>,
    rows: usize,
    skip_headers: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = Archive::open(&dir)?;

    let file = match extension {
        None => &archive.core,
        Some(n) => archive.extensions.get(n).ok_or_else(|| {
            format!(
                "No extension {} (archive has {})",
                n,
                archive.extensions.len()
            )
        })?,
    };

    if verbose {
        eprintln!(
            "{} {} ({})",
            "Reading".cyan().bold(),
            file.meta.locations.first().map_or("?", |s| s.as_str()),
            file.meta.row_type
        );
    }

    let mut reader = file.open()?;

    // The reader never skips headers on its own; honor the descriptor's
    // declared count only when asked to.
    if skip_headers {
        for _ in 0..file.meta.ignore_header_lines {
            if reader.read_row()?.is_none() {
                return Ok(());
            }
        }
    }

    let mut printed = 0;
    while printed < rows {
        match reader.read_row()? {
            Some(row) => {
                println!("{}", row.join("\t"));
                printed += 1;
            }
            None => break,
        }
    }

    Ok(())
}
