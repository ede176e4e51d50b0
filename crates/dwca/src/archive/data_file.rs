//! One described tabular file and its post-decode resolution state.

use std::fs::File;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{DwcaError, Result};
use crate::meta::{Field, FileMeta};
use super::reader::{quote_byte, unescape_delimiter, RowReader};

/// Where a [`DataFile`] is in its lifecycle.
///
/// A file whose descriptor declares no fields is never resolved: it
/// gets no field index and no resolved path, and opening it is a
/// caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Freshly decoded from the descriptor; no index, no path.
    Decoded,
    /// Field index built and location (if any) joined to the root.
    Resolved,
}

/// A single tabular file described by the archive: its declared layout
/// plus the derived term→index lookup and resolved on-disk path.
#[derive(Debug, Clone)]
pub struct DataFile {
    /// Layout exactly as declared in `meta.xml`.
    pub meta: FileMeta,
    /// The record-link column: the `id` element for the core file, the
    /// `coreid` element for an extension.
    pub record_id: Option<Field>,
    state: ResolutionState,
    field_index: IndexMap<String, usize>,
    resolved_path: Option<PathBuf>,
}

impl DataFile {
    pub(crate) fn new(meta: FileMeta, record_id: Option<Field>) -> Self {
        Self {
            meta,
            record_id,
            state: ResolutionState::Decoded,
            field_index: IndexMap::new(),
            resolved_path: None,
        }
    }

    /// One-time post-decode step: build the term→index lookup and join
    /// the declared location onto the archive root.
    ///
    /// Files with no declared fields are skipped and stay [`Decoded`].
    /// More than one declared location is a structural error that fails
    /// the whole archive. A single missing location is not an error
    /// here; the file simply has no resolved path and cannot be opened.
    ///
    /// [`Decoded`]: ResolutionState::Decoded
    pub(crate) fn resolve(&mut self, root: &Path) -> Result<()> {
        if self.meta.fields.is_empty() {
            return Ok(());
        }

        // Document order; a duplicate term keeps its first position but
        // takes the last declared index.
        for field in &self.meta.fields {
            self.field_index.insert(field.term.clone(), field.index);
        }

        if self.meta.locations.len() > 1 {
            return Err(DwcaError::Descriptor(format!(
                "only one location per file is supported, got {} for row type '{}'",
                self.meta.locations.len(),
                self.meta.row_type
            )));
        }

        if let Some(location) = self.meta.locations.first() {
            self.resolved_path = Some(root.join(location));
        }

        self.state = ResolutionState::Resolved;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// The archive-root-joined path of this file, when one location was
    /// declared and the file has been resolved.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    /// The derived term→index lookup, in field declaration order.
    pub fn field_index(&self) -> &IndexMap<String, usize> {
        &self.field_index
    }

    /// Column index bound to `term`, or `None` when the term is not
    /// declared for this file (including files that were never
    /// resolved).
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.field_index.get(term).copied()
    }

    /// Open the resolved file and return a streaming row reader
    /// configured with this file's delimiter and quoting rules.
    ///
    /// Delimiter unescaping is deferred to this point, so a bad
    /// `fieldsTerminatedBy` only fails the file it belongs to. Header
    /// lines are not skipped; see [`FileMeta::ignore_header_lines`].
    /// The returned reader owns the file handle and releases it when
    /// dropped.
    pub fn open(&self) -> Result<RowReader> {
        let path = self.resolved_path.as_ref().ok_or_else(|| {
            DwcaError::Unresolved(format!(
                "no resolved location for row type '{}'",
                self.meta.row_type
            ))
        })?;

        let delimiter = unescape_delimiter(&self.meta.fields_terminated_by)?;
        let quote = quote_byte(&self.meta.fields_enclosed_by);

        let file = File::open(path).map_err(|e| DwcaError::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok(RowReader::new(file, delimiter, quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(index: usize, term: &str) -> Field {
        Field {
            index,
            term: term.to_string(),
        }
    }

    #[test]
    fn test_resolve_builds_index_and_path() {
        let meta = FileMeta {
            locations: vec!["occurrence.txt".to_string()],
            fields: vec![field(0, "a"), field(6, "b")],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        file.resolve(Path::new("archive")).unwrap();

        assert_eq!(file.state(), ResolutionState::Resolved);
        assert_eq!(
            file.resolved_path(),
            Some(Path::new("archive").join("occurrence.txt").as_path())
        );
        assert_eq!(file.index_of("a"), Some(0));
        assert_eq!(file.index_of("b"), Some(6));
        assert_eq!(file.index_of("missing"), None);
    }

    #[test]
    fn test_fieldless_file_stays_decoded() {
        let meta = FileMeta {
            locations: vec!["a.txt".to_string(), "b.txt".to_string()],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        // No fields: resolution is skipped entirely, even though two
        // locations would otherwise be a structural error.
        file.resolve(Path::new("archive")).unwrap();

        assert_eq!(file.state(), ResolutionState::Decoded);
        assert_eq!(file.resolved_path(), None);
        assert_eq!(file.index_of("anything"), None);
        assert!(matches!(file.open(), Err(DwcaError::Unresolved(_))));
    }

    #[test]
    fn test_two_locations_is_a_structural_error() {
        let meta = FileMeta {
            locations: vec!["a.txt".to_string(), "b.txt".to_string()],
            fields: vec![field(0, "a")],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        assert!(matches!(
            file.resolve(Path::new("archive")),
            Err(DwcaError::Descriptor(_))
        ));
    }

    #[test]
    fn test_no_location_resolves_without_path() {
        let meta = FileMeta {
            fields: vec![field(0, "a")],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        file.resolve(Path::new("archive")).unwrap();

        assert_eq!(file.state(), ResolutionState::Resolved);
        assert_eq!(file.index_of("a"), Some(0));
        assert!(matches!(file.open(), Err(DwcaError::Unresolved(_))));
    }

    #[test]
    fn test_duplicate_terms_take_the_last_index() {
        let meta = FileMeta {
            locations: vec!["a.txt".to_string()],
            fields: vec![field(1, "dup"), field(4, "dup")],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        file.resolve(Path::new("archive")).unwrap();

        assert_eq!(file.index_of("dup"), Some(4));
        assert_eq!(file.field_index().len(), 1);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let meta = FileMeta {
            locations: vec!["a.txt".to_string()],
            fields: vec![field(2, "x"), field(0, "y"), field(1, "x")],
            ..FileMeta::default()
        };

        let mut first = DataFile::new(meta.clone(), None);
        let mut second = DataFile::new(meta, None);
        first.resolve(Path::new("root")).unwrap();
        second.resolve(Path::new("root")).unwrap();

        assert_eq!(first.field_index(), second.field_index());
        let keys: Vec<&String> = first.field_index().keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_bad_delimiter_surfaces_at_open_time() {
        let meta = FileMeta {
            fields_terminated_by: "ab".to_string(),
            locations: vec!["a.txt".to_string()],
            fields: vec![field(0, "a")],
            ..FileMeta::default()
        };
        let mut file = DataFile::new(meta, None);
        // Resolution succeeds; the delimiter is only interpreted when a
        // reader is requested.
        file.resolve(Path::new("archive")).unwrap();
        assert!(matches!(
            file.open(),
            Err(DwcaError::InvalidDelimiter(_))
        ));
    }
}
