//! Error types for the dwca library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dwca operations.
#[derive(Debug, Error)]
pub enum DwcaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive path exists but is not a directory.
    #[error("Not a directory: '{0}' (expanded archive directories only)")]
    NotADirectory(PathBuf),

    /// Error from the XML parser while decoding `meta.xml`.
    #[error("XML error in meta.xml: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally invalid descriptor (missing core, bad attribute,
    /// more than one declared location).
    #[error("Invalid descriptor: {0}")]
    Descriptor(String),

    /// Field delimiter that does not unescape to a single character.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Operation attempted on a data file that was never resolved
    /// (no fields declared, or no location declared).
    #[error("Unresolved data file: {0}")]
    Unresolved(String),

    /// Error from the CSV library while reading rows.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for dwca operations.
pub type Result<T> = std::result::Result<T, DwcaError>;
