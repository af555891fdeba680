//! Tag normalization pipeline.
//!
//! Turns an element's free-form tags into typed, namespace-aware fields:
//!
//! 1. [`collect_tags`]: lowercase keys, first occurrence wins
//! 2. [`dispatch_tags`]: alias keys, classify, parse each `;` sub-value
//! 3. [`merge_namespaces`]: fold `main:sub` keys into groups
//! 4. [`collapse_lists`]: one-element lists become scalars

mod collector;
mod dispatch;
mod keys;
mod namespace;
mod parsers;

pub use collector::collect_tags;
pub use dispatch::{dispatch_tags, dispatch_value, parse_value, split_values, LIST_SEPARATOR};
pub use keys::{classify_key, normalize_key, KeyClass};
pub use namespace::{collapse_lists, merge_namespaces, split_namespace, VALUE_SUBKEY};
pub use parsers::{
    parse_count, parse_date, parse_edit_timestamp, parse_flag, parse_length, parse_speed,
    parse_weight,
};

use crate::types::{RawTag, TagFields};

/// Run the full tag pipeline for one element.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::normalize_tags;
/// use osmdocs_shaper::types::{RawTag, TagField, FieldSlot, TypedValue};
///
/// let fields = normalize_tags(&[RawTag::new("lit", "no")], "42");
/// assert_eq!(
///     fields["lit"],
///     TagField::Slot(FieldSlot::Scalar(TypedValue::Boolean(false)))
/// );
/// ```
pub fn normalize_tags(tags: &[RawTag], element_id: &str) -> TagFields {
    let collected = collect_tags(tags);
    let dispatched = dispatch_tags(&collected, element_id);
    collapse_lists(merge_namespaces(dispatched))
}
