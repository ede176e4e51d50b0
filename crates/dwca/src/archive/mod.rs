//! Archive handle: post-decode resolution and data file access.

use std::fs;
use std::path::Path;

use crate::error::{DwcaError, Result};
use crate::meta::{self, MetaDescriptor, META_XML_FILE_NAME};

mod data_file;
mod reader;

pub use data_file::{DataFile, ResolutionState};
pub use reader::RowReader;

/// An opened Darwin Core Archive: the descriptor decoded, every
/// described file resolved against the archive root, and term→index
/// lookups built. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Filename of the separate descriptive-metadata document (e.g.
    /// `eml.xml`), when the descriptor names one. Not parsed here.
    pub metadata: Option<String>,
    /// The core data file. Always present.
    pub core: DataFile,
    /// Extension data files, in descriptor order. May be empty.
    pub extensions: Vec<DataFile>,
}

impl Archive {
    /// Open an expanded archive directory: read and decode its
    /// `meta.xml`, then resolve every described file against the
    /// directory.
    ///
    /// Fails if the path is not a directory, the descriptor is missing
    /// or malformed, or any described file declares more than one
    /// location. No partial archive is ever returned.
    pub fn open(path: impl AsRef<Path>) -> Result<Archive> {
        let root = path.as_ref();

        let info = fs::metadata(root).map_err(|e| DwcaError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !info.is_dir() {
            return Err(DwcaError::NotADirectory(root.to_path_buf()));
        }

        let meta_path = root.join(META_XML_FILE_NAME);
        let xml = fs::read_to_string(&meta_path).map_err(|e| DwcaError::Io {
            path: meta_path.clone(),
            source: e,
        })?;

        let descriptor = meta::parse_descriptor(&xml)?;
        Self::from_descriptor(descriptor, root)
    }

    /// Finalize a decoded descriptor against an archive root: core
    /// first, then extensions in order, aborting on the first error.
    pub fn from_descriptor(
        descriptor: MetaDescriptor,
        root: impl AsRef<Path>,
    ) -> Result<Archive> {
        let root = root.as_ref();

        let mut core = DataFile::new(descriptor.core.file, descriptor.core.id);
        core.resolve(root)?;

        let mut extensions = Vec::with_capacity(descriptor.extensions.len());
        for extension in descriptor.extensions {
            let mut file = DataFile::new(extension.file, extension.core_id);
            file.resolve(root)?;
            extensions.push(file);
        }

        Ok(Archive {
            metadata: descriptor.metadata,
            core,
            extensions,
        })
    }
}
