//! Core data types for the shaper.
//!
//! Raw types (`RawElement`, `RawTag`, `Member`) mirror what the XML reader
//! sees. Typed types (`TypedValue`, `FieldSlot`, `TagField`) are what the
//! tag pipeline produces and what ends up in a `Document`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural kind of a map element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A single coordinate pair (OSM `node`).
    Point,

    /// An ordered chain of points (OSM `way`).
    Line,

    /// A group of other elements with roles (OSM `relation`).
    Composite,
}

impl ElementKind {
    /// Get the discriminator written to documents.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Composite => "composite",
        }
    }

    /// Get the element name used in OSM XML.
    #[must_use]
    pub fn osm_tag(&self) -> &'static str {
        match self {
            Self::Point => "node",
            Self::Line => "way",
            Self::Composite => "relation",
        }
    }

    /// Parse from an OSM XML element name or member `type` attribute.
    ///
    /// # Examples
    /// ```
    /// use osmdocs_shaper::types::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_osm_tag("way"), Some(ElementKind::Line));
    /// assert_eq!(ElementKind::from_osm_tag("changeset"), None);
    /// ```
    #[must_use]
    pub fn from_osm_tag(name: &str) -> Option<Self> {
        match name {
            "node" => Some(Self::Point),
            "way" => Some(Self::Line),
            "relation" => Some(Self::Composite),
            _ => None,
        }
    }
}

/// A raw `k`/`v` pair attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

impl RawTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A reference from a composite element to one of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Kind of the referenced element.
    pub kind: ElementKind,

    /// Identifier of the referenced element.
    pub reference: String,

    /// Role of the member within the composite (may be empty).
    pub role: String,
}

/// Kind-specific structure of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementBody {
    Point { lat: f64, lon: f64 },
    Line { nodes: Vec<String> },
    Composite { members: Vec<Member> },
}

impl ElementBody {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Point { .. } => ElementKind::Point,
            Self::Line { .. } => ElementKind::Line,
            Self::Composite { .. } => ElementKind::Composite,
        }
    }
}

/// One element as yielded by the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    pub id: String,
    pub uid: String,
    pub user: String,

    /// Edit timestamp as found in the source (`YYYY-MM-DDTHH:MM:SSZ`).
    pub timestamp: String,

    pub body: ElementBody,

    /// Tags in document order, keys not yet normalized.
    pub tags: Vec<RawTag>,
}

impl RawElement {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }
}

/// A single typed tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),

    /// ISO-8601 date-time string.
    Timestamp(String),

    /// Anything that is not (or could not be) parsed.
    Text(String),
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for TypedValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Value stored against one key: a scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldSlot {
    Scalar(TypedValue),
    List(Vec<TypedValue>),
}

impl FieldSlot {
    /// Build a slot from parsed sub-values: one value gives a scalar.
    #[must_use]
    pub fn from_values(mut values: Vec<TypedValue>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Self::Scalar(value);
            }
        }
        Self::List(values)
    }

    /// Number of values held.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::List(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_values(self) -> Vec<TypedValue> {
        match self {
            Self::Scalar(value) => vec![value],
            Self::List(values) => values,
        }
    }

    /// Append the values of `other`, turning this slot into a list.
    pub fn extend(&mut self, other: FieldSlot) {
        let mut values = std::mem::replace(self, Self::List(Vec::new())).into_values();
        values.extend(other.into_values());
        *self = Self::List(values);
    }

    /// Replace a one-element list with its sole element.
    #[must_use]
    pub fn collapse(self) -> Self {
        match self {
            Self::List(mut values) if values.len() == 1 => match values.pop() {
                Some(value) => Self::Scalar(value),
                None => Self::List(values),
            },
            other => other,
        }
    }
}

/// Sub-key → slot mapping built from `main:sub` keys.
pub type NamespaceGroup = BTreeMap<String, FieldSlot>;

/// Normalized tag field stored under a root key of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagField {
    Slot(FieldSlot),
    Group(NamespaceGroup),
}

impl TagField {
    #[must_use]
    pub fn as_group(&self) -> Option<&NamespaceGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Slot(_) => None,
        }
    }
}

/// Normalized tag fields of one element, keyed by root key.
pub type TagFields = BTreeMap<String, TagField>;
