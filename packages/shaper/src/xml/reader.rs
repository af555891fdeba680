//! OSM XML reader.
//!
//! Parses an OSM export and yields one [`RawElement`] per top-level
//! `node`, `way` or `relation`, in document order. Other top-level elements
//! (`bounds`, `changeset`, ...) are ignored.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::debug;

use super::utils::{element_children, find_children, get_tag_name, required_attribute};
use crate::error::{Result, ShaperError};
use crate::types::{ElementBody, ElementKind, Member, RawElement, RawTag};

/// A parsed OSM XML document.
pub struct OsmReader<'input> {
    doc: Document<'input>,
}

impl<'input> OsmReader<'input> {
    /// Parse OSM XML text.
    ///
    /// # Errors
    /// Returns `ShaperError::XmlParse` if the text is not well-formed XML.
    pub fn parse(xml: &'input str) -> Result<Self> {
        Ok(Self {
            doc: Document::parse(xml)?,
        })
    }

    /// The underlying XML document, for passes that need raw attributes.
    #[must_use]
    pub fn document(&self) -> &Document<'input> {
        &self.doc
    }

    /// Top-level element nodes of a supported kind, in document order.
    pub fn element_nodes(&self) -> impl Iterator<Item = Node<'_, 'input>> {
        element_children(self.doc.root_element())
            .filter(|node| ElementKind::from_osm_tag(get_tag_name(*node)).is_some())
    }

    /// Read every supported element.
    ///
    /// Each item is read independently; one malformed element does not stop
    /// the iteration.
    pub fn elements(&self) -> impl Iterator<Item = Result<RawElement>> + use<'_, 'input> {
        self.element_nodes().map(read_element)
    }
}

/// Read an OSM source file into memory.
pub fn read_source(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Convert one `node`/`way`/`relation` XML element into a [`RawElement`].
///
/// # Errors
/// * `MissingAttribute` if `id`, `uid`, `user`, `timestamp` or a
///   kind-specific mandatory attribute is absent
/// * `InvalidAttribute` for non-numeric coordinates or unknown member types
pub fn read_element(node: Node<'_, '_>) -> Result<RawElement> {
    let name = get_tag_name(node);
    let kind = ElementKind::from_osm_tag(name)
        .ok_or_else(|| ShaperError::InvalidInput(format!("Unsupported element <{name}>")))?;

    let id = required_attribute(node, "id", None)?;
    let uid = required_attribute(node, "uid", Some(id))?;
    let user = required_attribute(node, "user", Some(id))?;
    let timestamp = required_attribute(node, "timestamp", Some(id))?;

    let body = match kind {
        ElementKind::Point => ElementBody::Point {
            lat: read_coordinate(node, "lat", id)?,
            lon: read_coordinate(node, "lon", id)?,
        },
        ElementKind::Line => ElementBody::Line {
            nodes: find_children(node, "nd")
                .map(|nd| required_attribute(nd, "ref", Some(id)).map(str::to_string))
                .collect::<Result<Vec<_>>>()?,
        },
        ElementKind::Composite => ElementBody::Composite {
            members: find_children(node, "member")
                .map(|member| read_member(member, id))
                .collect::<Result<Vec<_>>>()?,
        },
    };

    Ok(RawElement {
        id: id.to_string(),
        uid: uid.to_string(),
        user: user.to_string(),
        timestamp: timestamp.to_string(),
        body,
        tags: read_tags(node, id),
    })
}

fn read_coordinate(node: Node<'_, '_>, name: &str, id: &str) -> Result<f64> {
    let raw = required_attribute(node, name, Some(id))?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ShaperError::InvalidAttribute {
            attribute: name.to_string(),
            element: get_tag_name(node).to_string(),
            value: raw.to_string(),
        })
}

fn read_member(member: Node<'_, '_>, id: &str) -> Result<Member> {
    let kind_name = required_attribute(member, "type", Some(id))?;
    let kind = ElementKind::from_osm_tag(kind_name).ok_or_else(|| ShaperError::InvalidAttribute {
        attribute: "type".to_string(),
        element: "member".to_string(),
        value: kind_name.to_string(),
    })?;

    Ok(Member {
        kind,
        reference: required_attribute(member, "ref", Some(id))?.to_string(),
        role: member.attribute("role").unwrap_or_default().to_string(),
    })
}

fn read_tags(node: Node<'_, '_>, id: &str) -> Vec<RawTag> {
    let mut tags = Vec::new();
    for tag in find_children(node, "tag") {
        match tag.attribute("k") {
            Some(key) => tags.push(RawTag::new(key, tag.attribute("v").unwrap_or_default())),
            None => debug!(element_id = id, "skipping tag without key"),
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="51.0" minlon="-0.3" maxlat="51.2" maxlon="-0.1"/>
  <node id="1" lat="51.1323794" lon="-0.1598410" user="tilsch" uid="19799" timestamp="2008-02-09T11:34:42Z">
    <tag k="highway" v="crossing"/>
  </node>
  <way id="10" user="bob" uid="2" timestamp="2010-01-01T00:00:00Z">
    <nd ref="1"/>
    <nd ref="2"/>
  </way>
  <relation id="100" user="eve" uid="3" timestamp="2012-06-30T12:00:00Z">
    <member type="way" ref="10" role="outer"/>
    <member type="node" ref="1"/>
  </relation>
</osm>"#;

    #[test]
    fn test_reads_elements_in_order() {
        let reader = OsmReader::parse(SAMPLE).unwrap();
        let elements: Vec<RawElement> = reader.elements().collect::<Result<_>>().unwrap();

        let kinds: Vec<ElementKind> = elements.iter().map(RawElement::kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Point, ElementKind::Line, ElementKind::Composite]
        );
    }

    #[test]
    fn test_reads_point() {
        let reader = OsmReader::parse(SAMPLE).unwrap();
        let point = reader.elements().next().unwrap().unwrap();

        assert_eq!(point.id, "1");
        assert_eq!(point.uid, "19799");
        assert_eq!(point.user, "tilsch");
        assert_eq!(point.timestamp, "2008-02-09T11:34:42Z");
        assert_eq!(
            point.body,
            ElementBody::Point {
                lat: 51.1323794,
                lon: -0.1598410
            }
        );
        assert_eq!(point.tags, vec![RawTag::new("highway", "crossing")]);
    }

    #[test]
    fn test_reads_line_and_composite() {
        let reader = OsmReader::parse(SAMPLE).unwrap();
        let elements: Vec<RawElement> = reader.elements().collect::<Result<_>>().unwrap();

        assert_eq!(
            elements[1].body,
            ElementBody::Line {
                nodes: vec!["1".to_string(), "2".to_string()]
            }
        );
        assert_eq!(
            elements[2].body,
            ElementBody::Composite {
                members: vec![
                    Member {
                        kind: ElementKind::Line,
                        reference: "10".to_string(),
                        role: "outer".to_string(),
                    },
                    Member {
                        kind: ElementKind::Point,
                        reference: "1".to_string(),
                        role: String::new(),
                    },
                ]
            }
        );
    }

    #[test]
    fn test_malformed_element_does_not_stop_iteration() {
        let xml = r#"<osm>
  <node id="1" lat="north" lon="0" user="a" uid="1" timestamp="2008-02-09T11:34:42Z"/>
  <node id="2" lat="1" lon="0" uid="1" timestamp="2008-02-09T11:34:42Z"/>
  <node id="3" lat="1" lon="0" user="a" uid="1" timestamp="2008-02-09T11:34:42Z"/>
</osm>"#;
        let reader = OsmReader::parse(xml).unwrap();
        let results: Vec<Result<RawElement>> = reader.elements().collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[0],
            Err(ShaperError::InvalidAttribute { ref attribute, .. }) if attribute == "lat"
        ));
        assert!(matches!(
            results[1],
            Err(ShaperError::MissingAttribute { ref attribute, .. }) if attribute == "user"
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_unknown_member_type() {
        let xml = r#"<osm><relation id="5" user="a" uid="1" timestamp="2008-02-09T11:34:42Z">
  <member type="area" ref="1" role=""/>
</relation></osm>"#;
        let reader = OsmReader::parse(xml).unwrap();
        let err = reader.elements().next().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'area' for attribute 'type' on <member>"
        );
    }

    #[test]
    fn test_tag_without_key_is_skipped() {
        let xml = r#"<osm><node id="1" lat="0" lon="0" user="a" uid="1" timestamp="t">
  <tag v="orphan"/>
  <tag k="note"/>
</node></osm>"#;
        let reader = OsmReader::parse(xml).unwrap();
        let point = reader.elements().next().unwrap().unwrap();
        assert_eq!(point.tags, vec![RawTag::new("note", "")]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            OsmReader::parse("<osm><node></osm>"),
            Err(ShaperError::XmlParse(_))
        ));
    }
}
