//! Namespace merging and list collapsing.
//!
//! `main:sub` keys are gathered into one group per `main`. When the same root
//! also occurs as a plain key, the plain slot is kept inside the group under
//! [`VALUE_SUBKEY`]. Roots are resolved after all tags are seen, so the result
//! does not depend on which of the two spellings comes first.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::is_namespaced;
use crate::types::{FieldSlot, NamespaceGroup, TagField, TagFields};

/// Sub-key holding the plain value of a root that also has a namespace group.
pub const VALUE_SUBKEY: &str = "value";

/// Split a namespaced key on its first colon.
///
/// Returns `None` for keys that are not in `main:sub` form.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::split_namespace;
///
/// assert_eq!(split_namespace("address:street"), Some(("address", "street")));
/// assert_eq!(split_namespace("seamark:light:colour"), Some(("seamark", "light:colour")));
/// assert_eq!(split_namespace("highway"), None);
/// ```
#[must_use]
pub fn split_namespace(key: &str) -> Option<(&str, &str)> {
    if is_namespaced(key) {
        key.split_once(':')
    } else {
        None
    }
}

/// Merge dispatched fields into root-keyed tag fields.
///
/// - repeated `main:sub` entries extend the same sub-key, in input order
/// - a repeated plain key keeps its first slot
/// - a plain slot whose root also has a group is placed under `value`,
///   ahead of any explicit `main:value` entries
pub fn merge_namespaces(fields: Vec<(String, FieldSlot)>) -> TagFields {
    let mut plain: BTreeMap<String, FieldSlot> = BTreeMap::new();
    let mut groups: BTreeMap<String, NamespaceGroup> = BTreeMap::new();

    for (key, slot) in fields {
        match split_namespace(&key) {
            Some((main, sub)) => {
                let group = groups.entry(main.to_string()).or_default();
                match group.get_mut(sub) {
                    Some(existing) => existing.extend(slot),
                    None => {
                        group.insert(sub.to_string(), slot);
                    }
                }
            }
            None => {
                if plain.contains_key(&key) {
                    debug!(key = %key, "dropping repeated plain key");
                } else {
                    plain.insert(key, slot);
                }
            }
        }
    }

    let mut merged = TagFields::new();

    for (main, mut group) in groups {
        if let Some(mut slot) = plain.remove(&main) {
            if let Some(explicit) = group.remove(VALUE_SUBKEY) {
                slot.extend(explicit);
            }
            group.insert(VALUE_SUBKEY.to_string(), slot);
        }
        merged.insert(main, TagField::Group(group));
    }

    for (key, slot) in plain {
        merged.insert(key, TagField::Slot(slot));
    }

    merged
}

/// Replace every one-element list, top-level or grouped, with its element.
pub fn collapse_lists(fields: TagFields) -> TagFields {
    fields
        .into_iter()
        .map(|(key, field)| {
            let field = match field {
                TagField::Slot(slot) => TagField::Slot(slot.collapse()),
                TagField::Group(group) => TagField::Group(
                    group
                        .into_iter()
                        .map(|(sub, slot)| (sub, slot.collapse()))
                        .collect(),
                ),
            };
            (key, field)
        })
        .collect()
}
