//! Event-based decoder for the `meta.xml` descriptor.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DwcaError, Result};
use super::types::{CoreMeta, ExtensionMeta, Field, FileMeta, MetaDescriptor};

/// Which file declaration the parser is currently inside.
enum Section {
    Core,
    Extension,
}

/// Decode a descriptor document into a [`MetaDescriptor`].
///
/// Attribute and element names follow the DwC-A text schema: the
/// top-level `metadata` attribute, one `core` element, zero or more
/// `extension` elements, each carrying layout attributes, a
/// `files > location` list, an `id` (core) or `coreid` (extension)
/// link element, and `field` elements in document order.
///
/// Absent optional attributes decode to the empty string. Malformed
/// XML aborts the decode with no partial result. A descriptor with no
/// `core` element is rejected.
pub fn parse_descriptor(xml: &str) -> Result<MetaDescriptor> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut metadata: Option<String> = None;
    let mut core: Option<CoreMeta> = None;
    let mut extensions: Vec<ExtensionMeta> = Vec::new();

    let mut section: Option<Section> = None;
    let mut file = FileMeta::default();
    let mut link: Option<Field> = None;
    let mut in_location = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"archive" => metadata = metadata_attribute(e),
                b"core" => {
                    section = Some(Section::Core);
                    file = file_from_element(e);
                    link = None;
                }
                b"extension" => {
                    section = Some(Section::Extension);
                    file = file_from_element(e);
                    link = None;
                }
                b"location" => {
                    // The entry exists as soon as the element opens, so
                    // <location></location> and <location/> both decode
                    // to an empty location.
                    file.locations.push(String::new());
                    in_location = true;
                }
                b"id" if matches!(section, Some(Section::Core)) => {
                    link = Some(field_from_element(e)?);
                }
                b"coreid" if matches!(section, Some(Section::Extension)) => {
                    link = Some(field_from_element(e)?);
                }
                b"field" if section.is_some() => {
                    file.fields.push(field_from_element(e)?);
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"archive" => metadata = metadata_attribute(e),
                b"location" => file.locations.push(String::new()),
                b"id" if matches!(section, Some(Section::Core)) => {
                    link = Some(field_from_element(e)?);
                }
                b"coreid" if matches!(section, Some(Section::Extension)) => {
                    link = Some(field_from_element(e)?);
                }
                b"field" if section.is_some() => {
                    file.fields.push(field_from_element(e)?);
                }
                _ => {}
            },
            Event::Text(ref t) if in_location => {
                if let Some(location) = file.locations.last_mut() {
                    location.push_str(&t.unescape()?);
                }
            }
            Event::CData(ref t) if in_location => {
                if let Some(location) = file.locations.last_mut() {
                    location.push_str(&String::from_utf8_lossy(t.as_ref()));
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"location" => in_location = false,
                b"core" => {
                    core = Some(CoreMeta {
                        file: std::mem::take(&mut file),
                        id: link.take(),
                    });
                    section = None;
                }
                b"extension" => {
                    extensions.push(ExtensionMeta {
                        file: std::mem::take(&mut file),
                        core_id: link.take(),
                    });
                    section = None;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let core = core.ok_or_else(|| {
        DwcaError::Descriptor("descriptor has no <core> element".to_string())
    })?;

    Ok(MetaDescriptor {
        metadata,
        core,
        extensions,
    })
}

/// Extract the `metadata` attribute from the top-level element.
fn metadata_attribute(e: &BytesStart) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"metadata" {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

/// Map the layout attributes of a `core` or `extension` element.
fn file_from_element(e: &BytesStart) -> FileMeta {
    let mut file = FileMeta::default();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.local_name().as_ref() {
            b"encoding" => file.encoding = value,
            b"fieldsTerminatedBy" => file.fields_terminated_by = value,
            b"linesTerminatedBy" => file.lines_terminated_by = value,
            b"fieldsEnclosedBy" => file.fields_enclosed_by = value,
            b"ignoreHeaderLines" => {
                // Consumed, not validated: anything unparseable counts
                // as "no header lines declared".
                file.ignore_header_lines = value.trim().parse().unwrap_or(0);
            }
            b"rowType" => file.row_type = value,
            _ => {}
        }
    }
    file
}

/// Map the `index`/`term` attributes of a `field`, `id` or `coreid`
/// element.
fn field_from_element(e: &BytesStart) -> Result<Field> {
    let mut field = Field::default();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.local_name().as_ref() {
            b"index" => {
                field.index = value.trim().parse().map_err(|_| {
                    DwcaError::Descriptor(format!(
                        "invalid field index attribute '{}'",
                        value
                    ))
                })?;
            }
            b"term" => field.term = value,
            _ => {}
        }
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCCURRENCE_META: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<archive xmlns="http://rs.tdwg.org/dwc/text/" metadata="eml.xml">
  <core encoding="UTF-8" fieldsTerminatedBy="\t" linesTerminatedBy="\n"
        fieldsEnclosedBy="" ignoreHeaderLines="1"
        rowType="http://rs.tdwg.org/dwc/terms/Occurrence">
    <files>
      <location>occurrence.txt</location>
    </files>
    <id index="0" term=""/>
    <field index="1" term="http://rs.tdwg.org/dwc/terms/occurrenceID"/>
    <field index="6" term="http://rs.tdwg.org/dwc/terms/datasetID"/>
  </core>
  <extension encoding="UTF-8" fieldsTerminatedBy="\t" linesTerminatedBy="\n"
             fieldsEnclosedBy="" ignoreHeaderLines="1"
             rowType="http://rs.tdwg.org/dwc/terms/Identification">
    <files>
      <location>identification.txt</location>
    </files>
    <coreid index="0" term=""/>
    <field index="1" term="http://rs.tdwg.org/dwc/terms/identifiedBy"/>
  </extension>
</archive>"#;

    #[test]
    fn test_parse_full_descriptor() {
        let descriptor = parse_descriptor(OCCURRENCE_META).unwrap();

        assert_eq!(descriptor.metadata.as_deref(), Some("eml.xml"));

        let core = &descriptor.core;
        assert_eq!(core.file.encoding, "UTF-8");
        assert_eq!(core.file.fields_terminated_by, r"\t");
        assert_eq!(core.file.lines_terminated_by, r"\n");
        assert_eq!(core.file.fields_enclosed_by, "");
        assert_eq!(core.file.ignore_header_lines, 1);
        assert_eq!(
            core.file.row_type,
            "http://rs.tdwg.org/dwc/terms/Occurrence"
        );
        assert_eq!(core.file.locations, vec!["occurrence.txt"]);
        assert_eq!(core.id, Some(Field { index: 0, term: String::new() }));
        assert_eq!(core.file.fields.len(), 2);
        assert_eq!(core.file.fields[1].index, 6);
        assert_eq!(
            core.file.fields[1].term,
            "http://rs.tdwg.org/dwc/terms/datasetID"
        );

        assert_eq!(descriptor.extensions.len(), 1);
        let ext = &descriptor.extensions[0];
        assert_eq!(ext.file.locations, vec!["identification.txt"]);
        assert_eq!(ext.core_id, Some(Field { index: 0, term: String::new() }));
        assert_eq!(ext.file.fields.len(), 1);
    }

    #[test]
    fn test_missing_core_is_an_error() {
        let xml = r#"<archive metadata="eml.xml"></archive>"#;
        let err = parse_descriptor(xml).unwrap_err();
        assert!(matches!(err, DwcaError::Descriptor(_)));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = "<archive><core rowType=";
        assert!(matches!(
            parse_descriptor(xml),
            Err(DwcaError::Xml(_))
        ));
    }

    #[test]
    fn test_absent_attributes_default_to_empty() {
        let xml = r#"<archive><core><files><location>a.txt</location></files>
            <field index="0" term="t"/></core></archive>"#;
        let descriptor = parse_descriptor(xml).unwrap();
        let file = &descriptor.core.file;
        assert_eq!(file.encoding, "");
        assert_eq!(file.fields_terminated_by, "");
        assert_eq!(file.fields_enclosed_by, "");
        assert_eq!(file.row_type, "");
        assert_eq!(file.ignore_header_lines, 0);
        assert!(descriptor.core.id.is_none());
        assert!(descriptor.metadata.is_none());
    }

    #[test]
    fn test_unparseable_header_count_decodes_to_zero() {
        let xml = r#"<archive><core ignoreHeaderLines="many">
            <files><location>a.txt</location></files></core></archive>"#;
        let descriptor = parse_descriptor(xml).unwrap();
        assert_eq!(descriptor.core.file.ignore_header_lines, 0);
    }

    #[test]
    fn test_invalid_field_index_is_an_error() {
        let xml = r#"<archive><core>
            <field index="six" term="t"/></core></archive>"#;
        assert!(matches!(
            parse_descriptor(xml),
            Err(DwcaError::Descriptor(_))
        ));
    }

    #[test]
    fn test_multiple_locations_decode_in_order() {
        let xml = r#"<archive><core><files>
            <location>a.txt</location>
            <location>b.txt</location>
        </files></core></archive>"#;
        let descriptor = parse_descriptor(xml).unwrap();
        assert_eq!(descriptor.core.file.locations, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_empty_location_forms_decode_alike() {
        let paired = r#"<archive><core><files>
            <location></location>
        </files></core></archive>"#;
        let self_closing = r#"<archive><core><files>
            <location/>
        </files></core></archive>"#;

        let paired = parse_descriptor(paired).unwrap();
        let self_closing = parse_descriptor(self_closing).unwrap();
        assert_eq!(paired.core.file.locations, vec![""]);
        assert_eq!(
            paired.core.file.locations,
            self_closing.core.file.locations
        );
    }

    #[test]
    fn test_cdata_location_is_captured() {
        let xml = r#"<archive><core><files>
            <location><![CDATA[occurrence.txt]]></location>
        </files></core></archive>"#;
        let descriptor = parse_descriptor(xml).unwrap();
        assert_eq!(descriptor.core.file.locations, vec!["occurrence.txt"]);
    }

    #[test]
    fn test_fields_keep_document_order() {
        let xml = r#"<archive><core>
            <field index="2" term="c"/>
            <field index="0" term="a"/>
            <field index="1" term="b"/>
        </core></archive>"#;
        let descriptor = parse_descriptor(xml).unwrap();
        let terms: Vec<&str> = descriptor
            .core
            .file
            .fields
            .iter()
            .map(|f| f.term.as_str())
            .collect();
        assert_eq!(terms, vec!["c", "a", "b"]);
    }
}
