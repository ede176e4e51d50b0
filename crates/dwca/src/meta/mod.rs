//! Descriptor parsing: `meta.xml` → typed metadata tree.
//!
//! This stage decodes the document exactly as written. Path resolution
//! and field-index building happen later, in [`crate::archive`].

mod parser;
mod types;

pub use parser::parse_descriptor;
pub use types::{
    CoreMeta, ExtensionMeta, Field, FileMeta, MetaDescriptor, META_XML_FILE_NAME,
};
