//! Inspect command - show the archive layout.

use std::path::PathBuf;

use colored::Colorize;
use dwca::{Archive, DataFile};

pub fn run(
    dir: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = Archive::open(&dir)?;

    if json_output {
        let layout = serde_json::json!({
            "archive": dir,
            "metadata": archive.metadata,
            "core": file_json(&archive.core),
            "extensions": archive
                .extensions
                .iter()
                .map(file_json)
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("{} {}", "Archive".cyan().bold(), dir.display());
    if let Some(metadata) = &archive.metadata {
        println!("  metadata document: {}", metadata);
    }
    println!();

    print_file("Core", &archive.core, verbose);
    for (i, extension) in archive.extensions.iter().enumerate() {
        println!();
        print_file(&format!("Extension [{}]", i), extension, verbose);
    }

    Ok(())
}

fn file_json(file: &DataFile) -> serde_json::Value {
    serde_json::json!({
        "rowType": file.meta.row_type,
        "location": file.meta.locations.first(),
        "encoding": file.meta.encoding,
        "fieldsTerminatedBy": file.meta.fields_terminated_by,
        "fieldsEnclosedBy": file.meta.fields_enclosed_by,
        "ignoreHeaderLines": file.meta.ignore_header_lines,
        "recordId": file.record_id,
        "fields": file.field_index(),
    })
}

fn print_file(label: &str, file: &DataFile, verbose: bool) {
    println!(
        "{} {}",
        label.green().bold(),
        file.meta.row_type.white()
    );

    match file.meta.locations.first() {
        Some(location) => println!("  location: {}", location),
        None => println!("  location: {}", "(none declared)".yellow()),
    }
    if verbose {
        if let Some(path) = file.resolved_path() {
            println!("  resolved: {}", path.display());
        }
    }

    let quote = if file.meta.fields_enclosed_by.is_empty() {
        "none".to_string()
    } else {
        format!("{:?}", file.meta.fields_enclosed_by)
    };
    println!(
        "  delimiter: {:?}  quote: {}  header lines: {}",
        file.meta.fields_terminated_by, quote, file.meta.ignore_header_lines
    );

    if let Some(id) = &file.record_id {
        println!("  record id column: {}", id.index);
    }

    if file.field_index().is_empty() {
        println!("  fields: {}", "(none declared)".yellow());
    } else {
        println!("  fields:");
        for (term, index) in file.field_index() {
            println!("    {:>4}  {}", index.to_string().white().bold(), term);
        }
    }
}
