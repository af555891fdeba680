//! Value dispatch: pick a parser by key class and apply it per sub-value.

use tracing::warn;

use super::keys::{classify_key, normalize_key, KeyClass};
use super::parsers::{
    parse_count, parse_date, parse_flag, parse_length, parse_speed, parse_weight,
};
use crate::error::ParseFailure;
use crate::types::{FieldSlot, TypedValue};

/// Separator between the values of a multi-valued tag.
pub const LIST_SEPARATOR: char = ';';

/// Parse one sub-value for the given key class.
///
/// `Other` never fails: `yes`/`no` become booleans, anything else is text.
pub fn parse_value(class: KeyClass, raw: &str) -> Result<TypedValue, ParseFailure> {
    match class {
        KeyClass::Count => parse_count(raw),
        KeyClass::Length => parse_length(raw),
        KeyClass::Weight => parse_weight(raw),
        KeyClass::Speed => parse_speed(raw),
        KeyClass::Date => parse_date(raw),
        KeyClass::Other => Ok(parse_flag(raw)
            .map(TypedValue::Boolean)
            .unwrap_or_else(|| TypedValue::Text(raw.to_string()))),
    }
}

/// Split a raw tag value into its sub-values.
///
/// A value without a separator is returned verbatim; the parts of a list are
/// trimmed. Empty parts are kept so the split order is never shifted.
pub fn split_values(raw: &str) -> Vec<&str> {
    if raw.contains(LIST_SEPARATOR) {
        raw.split(LIST_SEPARATOR).map(str::trim).collect()
    } else {
        vec![raw]
    }
}

/// Turn a canonical key and its raw value into a field slot.
///
/// Parse failures are logged with the element and key they belong to and
/// the cleaned string is stored instead.
pub fn dispatch_value(key: &str, raw: &str, element_id: &str) -> FieldSlot {
    let class = classify_key(key);
    let values = split_values(raw)
        .into_iter()
        .map(|sub| {
            parse_value(class, sub).unwrap_or_else(|failure| {
                warn!(
                    element_id,
                    key,
                    raw = %failure.raw,
                    "{failure}, keeping '{}'",
                    failure.cleaned
                );
                TypedValue::Text(failure.cleaned)
            })
        })
        .collect();

    FieldSlot::from_values(values)
}

/// Normalize keys and dispatch the values of collected tags.
///
/// Output order follows input order.
pub fn dispatch_tags(tags: &[(String, String)], element_id: &str) -> Vec<(String, FieldSlot)> {
    tags.iter()
        .map(|(key, value)| {
            let key = normalize_key(key);
            (key.to_string(), dispatch_value(key, value, element_id))
        })
        .collect()
}
