//! Output documents.
//!
//! A [`Document`] is the final, immutable shape of one element: core
//! attributes, the kind-specific structure and the normalized tag fields,
//! serialized as one flat JSON object.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, warn};

use crate::tags::parse_edit_timestamp;
use crate::types::{ElementBody, ElementKind, Member, RawElement, TagField, TagFields};

/// Document field names owned by the element itself.
///
/// A tag field with one of these names is dropped.
pub const RESERVED_FIELDS: [&str; 9] = [
    "element_type",
    "_id",
    "user",
    "uid",
    "created",
    "lat",
    "lon",
    "nodes",
    "members",
];

/// Normalized document for one map element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: ElementKind,
    pub id: String,
    pub user: String,
    pub uid: String,

    /// Edit timestamp in ISO-8601, or the source value if it did not parse.
    pub created: String,

    pub body: ElementBody,
    pub fields: TagFields,
}

impl Document {
    /// Build a document from a raw element and its normalized tag fields.
    pub fn assemble(element: &RawElement, mut fields: TagFields) -> Self {
        fields.retain(|key, _| {
            let reserved = RESERVED_FIELDS.contains(&key.as_str());
            if reserved {
                debug!(
                    element_id = %element.id,
                    key = %key,
                    "dropping tag that shadows a document field"
                );
            }
            !reserved
        });

        let created = parse_edit_timestamp(&element.timestamp).unwrap_or_else(|| {
            warn!(
                element_id = %element.id,
                raw = %element.timestamp,
                "unrecognized edit timestamp, keeping source value"
            );
            element.timestamp.clone()
        });

        Self {
            kind: element.kind(),
            id: element.id.clone(),
            user: element.user.clone(),
            uid: element.uid.clone(),
            created,
            body: element.body.clone(),
            fields,
        }
    }

    /// Look up a normalized tag field by root key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&TagField> {
        self.fields.get(key)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("element_type", self.kind.as_str())?;
        map.serialize_entry("_id", &self.id)?;
        map.serialize_entry("user", &self.user)?;
        map.serialize_entry("uid", &self.uid)?;
        map.serialize_entry("created", &self.created)?;

        match &self.body {
            ElementBody::Point { lat, lon } => {
                map.serialize_entry("lat", lat)?;
                map.serialize_entry("lon", lon)?;
            }
            ElementBody::Line { nodes } => map.serialize_entry("nodes", nodes)?,
            ElementBody::Composite { members } => map.serialize_entry("members", members)?,
        }

        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

/// Members serialize as `{ "<kind>": "<ref>", "role": "<role>" }`.
impl Serialize for Member {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.as_str(), &self.reference)?;
        map.serialize_entry("role", &self.role)?;
        map.end()
    }
}
