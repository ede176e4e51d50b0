//! dwca: reading Darwin Core Archives (DwC-A).
//!
//! A Darwin Core Archive is an expanded directory holding a `meta.xml`
//! descriptor, one core tabular data file, and zero or more extension
//! files, each with its own delimiter, quoting and header rules. This
//! crate decodes the descriptor into a typed metadata tree, resolves
//! file locations and term→column lookups, and hands out streaming row
//! readers configured per file.
//!
//! # Example
//!
//! ```no_run
//! use dwca::Archive;
//!
//! let archive = Archive::open("my-archive/").unwrap();
//! println!("core row type: {}", archive.core.meta.row_type);
//!
//! let column = archive
//!     .core
//!     .index_of("http://rs.tdwg.org/dwc/terms/datasetID");
//!
//! let mut reader = archive.core.open().unwrap();
//! while let Some(row) = reader.read_row().unwrap() {
//!     if let Some(i) = column {
//!         println!("datasetID = {}", row.get(i).map_or("", |s| s.as_str()));
//!     }
//! }
//! ```
//!
//! Header lines declared by `ignoreHeaderLines` are *not* skipped by
//! the reader; skipping is the caller's decision.

pub mod archive;
pub mod error;
pub mod meta;

pub use archive::{Archive, DataFile, ResolutionState, RowReader};
pub use error::{DwcaError, Result};
pub use meta::{CoreMeta, ExtensionMeta, Field, FileMeta, MetaDescriptor};
