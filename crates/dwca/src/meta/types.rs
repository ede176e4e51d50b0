//! Data model for the `meta.xml` archive descriptor.

use serde::Serialize;

/// Name of the descriptor file at the root of every expanded archive.
pub const META_XML_FILE_NAME: &str = "meta.xml";

/// A single declared column binding: a Darwin Core term URI and the
/// zero-based column it occupies within a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Zero-based column position within a row.
    pub index: usize,
    /// Term URI identifying the semantic meaning of the column
    /// (e.g. `http://rs.tdwg.org/dwc/terms/datasetID`).
    pub term: String,
}

/// Physical encoding and logical row layout of one tabular data file,
/// exactly as declared in the descriptor. No path resolution or index
/// building has happened at this stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileMeta {
    /// Declared text encoding name (consumed, not validated).
    pub encoding: String,
    /// Column delimiter as an escaped string (e.g. `\t`); unescaped to a
    /// single character when a reader is opened.
    pub fields_terminated_by: String,
    /// Row delimiter; consumed by the line-splitting layer.
    pub lines_terminated_by: String,
    /// Quote character. Empty means no quoting.
    pub fields_enclosed_by: String,
    /// Leading header lines the caller should skip. Absent or
    /// unparseable values decode to 0.
    pub ignore_header_lines: usize,
    /// Row type URI (e.g. `http://rs.tdwg.org/dwc/terms/Occurrence`).
    pub row_type: String,
    /// Declared relative file locations, in document order. Only a
    /// single location is supported; the count is validated when the
    /// archive is resolved, not here.
    pub locations: Vec<String>,
    /// Declared column bindings, in document order.
    pub fields: Vec<Field>,
}

/// The core file declaration: its layout plus the `id` element naming
/// the column that identifies each core record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoreMeta {
    pub file: FileMeta,
    /// The `id` child element, when declared.
    pub id: Option<Field>,
}

/// An extension file declaration: its layout plus the `coreid` element
/// naming the column that links each row back to a core record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtensionMeta {
    pub file: FileMeta,
    /// The `coreid` child element, when declared.
    pub core_id: Option<Field>,
}

/// The decoded descriptor: one core file, zero or more extensions, and
/// an optional pointer to a separate descriptive-metadata document.
#[derive(Debug, Clone, Serialize)]
pub struct MetaDescriptor {
    /// Value of the top-level `metadata` attribute (a filename such as
    /// `eml.xml`), not parsed by this crate.
    pub metadata: Option<String>,
    pub core: CoreMeta,
    pub extensions: Vec<ExtensionMeta>,
}
