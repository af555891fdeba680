//! Structural audit of an OSM export.
//!
//! Walks every XML element and checks the assumptions the shaper relies on:
//! numeric ids, non-empty user and timestamp, numeric coordinates, at least
//! two node references per way, at least two well-formed members per
//! relation, and tags with both a key and a value. Nothing is rejected here;
//! findings are collected into an [`AuditReport`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use serde::Serialize;
use tracing::info;

use crate::config::{
    validate_input_path, NUMERIC_ID, SOURCE_TIMESTAMP_FORMAT, SUPPORTED_ELEMENTS,
    SUPPORTED_SUBELEMENTS,
};
use crate::error::Result;
use crate::types::ElementKind;
use crate::xml::{find_children, get_tag_name, read_source, OsmReader};

/// Count and findings for one element name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementAudit {
    pub count: usize,
    pub errors: Vec<String>,
}

/// Result of auditing one OSM document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Supported element and sub-element names.
    pub elements: BTreeMap<String, ElementAudit>,

    /// Occurrences of every other element name (`osm`, `bounds`, ...).
    pub unsupported: BTreeMap<String, usize>,

    /// Number of XML elements visited.
    pub total: usize,
}

impl Default for AuditReport {
    fn default() -> Self {
        let elements = SUPPORTED_ELEMENTS
            .iter()
            .chain(SUPPORTED_SUBELEMENTS.iter())
            .map(|name| ((*name).to_string(), ElementAudit::default()))
            .collect();
        Self {
            elements,
            unsupported: BTreeMap::new(),
            total: 0,
        }
    }
}

impl AuditReport {
    /// Audit entry for an element name, if it is a supported one.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&ElementAudit> {
        self.elements.get(name)
    }

    /// Number of findings across all element names.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.elements.values().map(|audit| audit.errors.len()).sum()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }

    fn record(&mut self, name: &str, errors: Vec<String>) {
        let audit = self.elements.entry(name.to_string()).or_default();
        audit.count += 1;
        audit.errors.extend(errors);
    }
}

/// Audit every element of a parsed XML document.
pub fn audit_document(doc: &Document<'_>) -> AuditReport {
    let mut report = AuditReport::default();

    for node in doc.descendants().filter(|node| node.is_element()) {
        report.total += 1;
        let name = get_tag_name(node);

        if let Some(kind) = ElementKind::from_osm_tag(name) {
            let mut errors = check_core_attributes(node);
            errors.extend(match kind {
                ElementKind::Point => check_node(node),
                ElementKind::Line => check_way(node),
                ElementKind::Composite => check_relation(node),
            });
            report.record(name, errors);
        } else {
            match name {
                "tag" => report.record(name, check_tag(node)),
                // checked as part of their parent
                "nd" | "member" => report.record(name, Vec::new()),
                _ => *report.unsupported.entry(name.to_string()).or_insert(0) += 1,
            }
        }
    }

    info!(
        total = report.total,
        errors = report.error_count(),
        "audit finished"
    );
    report
}

/// Audit OSM XML text.
pub fn audit_xml(xml: &str) -> Result<AuditReport> {
    let reader = OsmReader::parse(xml)?;
    Ok(audit_document(reader.document()))
}

/// Read and audit an OSM XML file.
pub fn audit_file(path: &Path) -> Result<AuditReport> {
    validate_input_path(path)?;
    let xml = read_source(path)?;
    audit_xml(&xml)
}

fn id_of<'a>(node: Node<'a, '_>) -> &'a str {
    node.attribute("id").unwrap_or("?")
}

fn is_numeric(value: &str) -> bool {
    NUMERIC_ID.is_match(value)
}

fn check_core_attributes(node: Node<'_, '_>) -> Vec<String> {
    let name = get_tag_name(node);
    let mut errors = Vec::new();

    for attribute in ["id", "uid"] {
        match node.attribute(attribute) {
            None => errors.push(format!("No {attribute} attribute in {name}")),
            Some(value) if !is_numeric(value) => {
                errors.push(format!("Non-numeric {attribute}: {value} in {name}"));
            }
            Some(_) => {}
        }
    }

    match node.attribute("user") {
        None => errors.push(format!("No user attribute in {name} {}", id_of(node))),
        Some("") => errors.push(format!(
            "No value for user attribute in {name} {}",
            id_of(node)
        )),
        Some(_) => {}
    }

    match node.attribute("timestamp") {
        None => errors.push(format!("No timestamp attribute in {name} {}", id_of(node))),
        Some("") => errors.push(format!(
            "No value for timestamp attribute in {name} {}",
            id_of(node)
        )),
        Some(value) if NaiveDateTime::parse_from_str(value, SOURCE_TIMESTAMP_FORMAT).is_err() => {
            errors.push(format!("Invalid timestamp: {value} in {name} {}", id_of(node)));
        }
        Some(_) => {}
    }

    errors
}

fn check_node(node: Node<'_, '_>) -> Vec<String> {
    let mut errors = Vec::new();
    for attribute in ["lat", "lon"] {
        match node.attribute(attribute) {
            None | Some("") => {
                errors.push(format!("No {attribute} attribute in node {}", id_of(node)));
            }
            Some(value) if value.trim().parse::<f64>().is_err() => errors.push(format!(
                "Non-numeric {attribute}: {value} in node {}",
                id_of(node)
            )),
            Some(_) => {}
        }
    }
    errors
}

fn check_way(node: Node<'_, '_>) -> Vec<String> {
    let id = id_of(node);
    let refs: Vec<Node<'_, '_>> = find_children(node, "nd").collect();
    let mut errors = Vec::new();

    if refs.len() < 2 {
        errors.push(format!("Not enough nd elements within way {id}"));
    }
    for nd in refs {
        match nd.attribute("ref") {
            None | Some("") => errors.push(format!("No ref attribute in way {id}")),
            Some(value) if !is_numeric(value) => {
                errors.push(format!("Non-numeric ref attribute for nd in way {id}"));
            }
            Some(_) => {}
        }
    }
    errors
}

fn check_relation(node: Node<'_, '_>) -> Vec<String> {
    let id = id_of(node);
    let members: Vec<Node<'_, '_>> = find_children(node, "member").collect();
    let mut errors = Vec::new();

    if members.len() < 2 {
        errors.push(format!("Not enough member elements within relation {id}"));
    }
    for member in members {
        match member.attribute("ref") {
            None | Some("") => errors.push(format!("No ref attribute in relation {id}")),
            Some(value) if !is_numeric(value) => {
                errors.push(format!("Non-numeric ref attribute for member in relation {id}"));
            }
            Some(_) => {}
        }

        if member.attribute("role").is_none() {
            errors.push(format!("No role attribute in relation {id}"));
        }

        match member.attribute("type") {
            None | Some("") => errors.push(format!("No type attribute in relation {id}")),
            Some(value) if ElementKind::from_osm_tag(value).is_none() => errors.push(format!(
                "Member type unrecognised value: {value} in relation {id}"
            )),
            Some(_) => {}
        }
    }
    errors
}

fn check_tag(node: Node<'_, '_>) -> Vec<String> {
    let mut errors = Vec::new();
    if node.attribute("k").is_none_or(str::is_empty) {
        errors.push("No k attribute for tag".to_string());
    }
    if node.attribute("v").is_none_or(str::is_empty) {
        errors.push("No v attribute for tag".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CLEAN: &str = r#"<osm version="0.6">
  <bounds minlat="0" minlon="0" maxlat="1" maxlon="1"/>
  <node id="1" lat="51.1" lon="-0.1" user="a" uid="7" timestamp="2008-02-09T11:34:42Z">
    <tag k="highway" v="crossing"/>
  </node>
  <way id="2" user="a" uid="7" timestamp="2008-02-09T11:34:42Z">
    <nd ref="1"/><nd ref="3"/>
  </way>
  <relation id="3" user="a" uid="7" timestamp="2008-02-09T11:34:42Z">
    <member type="way" ref="2" role="outer"/>
    <member type="node" ref="1" role=""/>
  </relation>
</osm>"#;

    #[test]
    fn test_clean_document() {
        let report = audit_xml(CLEAN).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.total, 10);
        assert_eq!(report.entry("node").unwrap().count, 1);
        assert_eq!(report.entry("nd").unwrap().count, 2);
        assert_eq!(report.entry("member").unwrap().count, 2);
        assert_eq!(report.entry("tag").unwrap().count, 1);
        assert_eq!(
            report.unsupported,
            BTreeMap::from([("bounds".to_string(), 1), ("osm".to_string(), 1)])
        );
    }

    #[test]
    fn test_core_attribute_errors() {
        let xml = r#"<osm><node id="x1" lat="1" lon="1" uid="7" timestamp="yesterday"/></osm>"#;
        let report = audit_xml(xml).unwrap();

        assert_eq!(
            report.entry("node").unwrap().errors,
            vec![
                "Non-numeric id: x1 in node",
                "No user attribute in node x1",
                "Invalid timestamp: yesterday in node x1",
            ]
        );
    }

    #[test]
    fn test_node_coordinate_errors() {
        let xml = r#"<osm><node id="1" lat="north" user="a" uid="7" timestamp="2008-02-09T11:34:42Z"/></osm>"#;
        let report = audit_xml(xml).unwrap();

        assert_eq!(
            report.entry("node").unwrap().errors,
            vec!["Non-numeric lat: north in node 1", "No lon attribute in node 1"]
        );
    }

    #[test]
    fn test_way_and_relation_errors() {
        let xml = r#"<osm>
  <way id="2" user="a" uid="7" timestamp="2008-02-09T11:34:42Z"><nd ref="a"/></way>
  <relation id="3" user="a" uid="7" timestamp="2008-02-09T11:34:42Z">
    <member type="area" ref="1"/>
  </relation>
</osm>"#;
        let report = audit_xml(xml).unwrap();

        assert_eq!(
            report.entry("way").unwrap().errors,
            vec![
                "Not enough nd elements within way 2",
                "Non-numeric ref attribute for nd in way 2",
            ]
        );
        assert_eq!(
            report.entry("relation").unwrap().errors,
            vec![
                "Not enough member elements within relation 3",
                "No role attribute in relation 3",
                "Member type unrecognised value: area in relation 3",
            ]
        );
    }

    #[test]
    fn test_tag_errors() {
        let xml = r#"<osm><node id="1" lat="1" lon="1" user="a" uid="7" timestamp="2008-02-09T11:34:42Z">
  <tag k="" v="x"/><tag k="note"/>
</node></osm>"#;
        let report = audit_xml(xml).unwrap();

        let tags = report.entry("tag").unwrap();
        assert_eq!(tags.count, 2);
        assert_eq!(tags.errors, vec!["No k attribute for tag", "No v attribute for tag"]);
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let report = audit_xml(CLEAN).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["elements"]["way"]["count"], 1);
        assert_eq!(value["unsupported"]["bounds"], 1);
        assert_eq!(value["total"], 10);
    }
}
