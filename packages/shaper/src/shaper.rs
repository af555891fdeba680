//! Main shaper service that ties all components together.

use std::path::Path;

use tracing::{info, warn};

use crate::config::validate_input_path;
use crate::document::Document;
use crate::error::Result;
use crate::tags::normalize_tags;
use crate::types::{ElementKind, RawElement};
use crate::xml::{read_source, OsmReader};

/// Result of shaping one source.
#[derive(Debug, Default)]
pub struct ShapeOutcome {
    /// Documents in source order.
    pub documents: Vec<Document>,

    /// One message per element that could not be read.
    pub warnings: Vec<String>,
}

impl ShapeOutcome {
    /// Number of documents of the given kind.
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.documents.iter().filter(|doc| doc.kind == kind).count()
    }
}

/// Shape a single element into its document.
///
/// This is a pure function of the element and the static key tables.
pub fn shape_element(element: &RawElement) -> Document {
    let fields = normalize_tags(&element.tags, &element.id);
    Document::assemble(element, fields)
}

/// Shape every element of an OSM XML document.
///
/// Elements that cannot be read are skipped and reported in
/// `ShapeOutcome::warnings`; malformed XML fails the whole call.
pub fn shape_xml(xml: &str) -> Result<ShapeOutcome> {
    let reader = OsmReader::parse(xml)?;
    let mut outcome = ShapeOutcome::default();

    for (position, element) in reader.elements().enumerate() {
        match element {
            Ok(element) => outcome.documents.push(shape_element(&element)),
            Err(e) => {
                warn!(position, "skipping element: {e}");
                outcome.warnings.push(format!("Element #{}: {e}", position + 1));
            }
        }
    }

    info!(
        documents = outcome.documents.len(),
        skipped = outcome.warnings.len(),
        "shaped elements"
    );
    Ok(outcome)
}

/// Read and shape an OSM XML file.
pub fn shape_file(path: &Path) -> Result<ShapeOutcome> {
    validate_input_path(path)?;
    let xml = read_source(path)?;
    shape_xml(&xml)
}
