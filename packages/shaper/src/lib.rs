//! OSM document shaper - Turn OSM XML exports into typed JSON documents.
//!
//! This crate reads `node`, `way` and `relation` elements from an OSM XML
//! export and converts each one into a flat, typed document: alias keys are
//! folded into canonical keys, counts, lengths, weights, speeds and dates are
//! parsed into numbers and ISO-8601 strings, `;` lists are split, and
//! `main:sub` keys are merged into nested groups.
//!
//! # Example
//!
//! ```
//! use osmdocs_shaper::shape_xml;
//!
//! let xml = r#"<osm>
//!   <node id="1" lat="51.13" lon="-0.16" user="tilsch" uid="19799"
//!         timestamp="2008-02-09T11:34:42Z">
//!     <tag k="highway" v="crossing"/>
//!     <tag k="lit" v="no"/>
//!   </node>
//! </osm>"#;
//!
//! let outcome = shape_xml(xml).unwrap();
//! let doc = serde_json::to_value(&outcome.documents[0]).unwrap();
//! assert_eq!(doc["element_type"], "point");
//! assert_eq!(doc["created"], "2008-02-09T11:34:42");
//! assert_eq!(doc["lit"], false);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (RawElement, TypedValue, FieldSlot, TagField)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: OSM XML reader and utilities
//! - [`tags`]: Tag normalization (aliases, value parsers, namespaces)
//! - [`document`]: Output document assembly and serialization
//! - [`shaper`]: Main shaper service
//! - [`json`]: JSON output generation
//! - [`report`]: Structural audit and tag frequency reports
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod json;
pub mod report;
pub mod shaper;
pub mod tags;
pub mod types;
pub mod xml;

// Re-export main functions
pub use shaper::{shape_element, shape_file, shape_xml, ShapeOutcome};

// Re-export commonly used items
pub use document::Document;
pub use error::{ParseFailure, Result, ShaperError};
pub use types::{ElementKind, FieldSlot, RawElement, RawTag, TagField, TypedValue};
