//! Key normalization and key-class membership.
//!
//! Both tables are fixed process-wide data. The alias table collapses the
//! many spellings contributors use for address and contact details onto one
//! `address:*` or `contact:*` key. The five key-class sets decide which value
//! parser a canonical key gets; they are disjoint.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias spelling → canonical key. Keys are lowercase.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("addr:door", "address:door"),
    ("addr:unit", "address:unit"),
    ("addr:unitnumber", "address:unit"),
    ("addr:alternate", "address:alternate"),
    ("addr:place", "address:place"),
    ("addr:street_1", "address:place"),
    ("rooms", "address:rooms"),
    ("addr:flats", "address:flats"),
    ("addr:flat", "address:flats"),
    ("addr:flatnumber", "address:flats"),
    ("addr:floor", "address:floor"),
    ("addr:housename", "address:housename"),
    ("housenumber", "address:housenumber"),
    ("addr:housenumber", "address:housenumber"),
    ("addr:buildingnumber", "address:housenumber"),
    ("addr:street", "address:street"),
    ("street", "address:street"),
    ("addr:district", "address:district"),
    ("is_in", "address:city"),
    ("is_in:district", "address:district"),
    ("addr:suburb", "address:suburb"),
    ("is_in:city", "address:city"),
    ("addr:city", "address:city"),
    ("addr:state", "address:county"),
    ("addr:postcode", "address:postcode"),
    ("postal_code", "address:postcode"),
    ("addr:postcode_alt", "address:postcode"),
    ("addr:postcode:alt", "address:postcode"),
    ("addr:country", "address:country"),
    ("addr:interpolation", "address:interpolation"),
    ("addr:inclusion", "address:inclusion"),
    ("addr:in", "address:in"),
    ("addr:accessvia", "address:accessvia"),
    ("addr:full", "address:full"),
    ("contact:email", "contact:email"),
    ("email", "contact:email"),
    ("contact:phone", "contact:phone"),
    ("phone", "contact:phone"),
    ("address:phone", "contact:phone"),
    ("fax", "contact:fax"),
    ("contact:fax", "contact:fax"),
    ("contact:website", "contact:website"),
    ("website", "contact:website"),
    ("url", "contact:website"),
    ("uri", "contact:website"),
    ("contact:google_plus", "contact:google_plus"),
    ("facebook", "contact:facebook"),
    ("flickr", "contact:flickr"),
    ("twitter", "contact:twitter"),
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KEY_ALIASES.iter().copied().collect());

/// Plain counts: parsed as integers, falling back to floats.
const COUNT_KEYS: &[&str] = &[
    "admin_level",
    "building:levels",
    "building:min_level",
    "cables",
    "capacity",
    "capacity:disabled",
    "circuits",
    "cyclestreets_id",
    "frequency",
    "interval",
    "lanes",
    "layer",
    "level",
    "max_age",
    "min_age",
    "passenger_lines",
    "rooms",
    "seats",
    "step_count",
    "voltage",
];

/// Lengths: converted to meters.
const LENGTH_KEYS: &[&str] = &[
    "width",
    "maxwidth",
    "est_width",
    "circumference",
    "height",
    "maxheight",
    "maxheight:physical",
    "length",
];

/// Weights: converted to tons.
const WEIGHT_KEYS: &[&str] = &["maxweight"];

/// Speeds: converted to mph.
const SPEED_KEYS: &[&str] = &["maxspeed"];

/// Dates: converted to ISO-8601 timestamps.
const DATE_KEYS: &[&str] = &["opening_date", "survey:date", "start_date"];

/// Value class of a canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    Count,
    Length,
    Weight,
    Speed,
    Date,

    /// Not a typed key: only `yes`/`no` are coerced (to booleans).
    Other,
}

impl KeyClass {
    /// Human-readable class name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Speed => "speed",
            Self::Date => "date",
            Self::Other => "text",
        }
    }

    /// The key set backing this class (empty for `Other`).
    #[must_use]
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::Count => COUNT_KEYS,
            Self::Length => LENGTH_KEYS,
            Self::Weight => WEIGHT_KEYS,
            Self::Speed => SPEED_KEYS,
            Self::Date => DATE_KEYS,
            Self::Other => &[],
        }
    }

    /// Typed classes in lookup priority order.
    pub const TYPED: [KeyClass; 5] = [
        KeyClass::Count,
        KeyClass::Length,
        KeyClass::Weight,
        KeyClass::Speed,
        KeyClass::Date,
    ];
}

/// Map a lowercased key to its canonical spelling.
///
/// Keys without an alias are returned unchanged.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::normalize_key;
///
/// assert_eq!(normalize_key("addr:street"), "address:street");
/// assert_eq!(normalize_key("website"), "contact:website");
/// assert_eq!(normalize_key("highway"), "highway");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> &str {
    ALIAS_TABLE.get(key).copied().unwrap_or(key)
}

/// Classify a canonical key into its value class.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::{classify_key, KeyClass};
///
/// assert_eq!(classify_key("lanes"), KeyClass::Count);
/// assert_eq!(classify_key("maxheight"), KeyClass::Length);
/// assert_eq!(classify_key("lit"), KeyClass::Other);
/// ```
#[must_use]
pub fn classify_key(key: &str) -> KeyClass {
    KeyClass::TYPED
        .into_iter()
        .find(|class| class.keys().contains(&key))
        .unwrap_or(KeyClass::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_is_idempotent() {
        for (alias, canonical) in KEY_ALIASES {
            let once = normalize_key(alias);
            assert_eq!(once, *canonical);
            assert_eq!(normalize_key(once), once, "{alias} is not stable");
        }
    }

    #[test]
    fn test_alias_keys_are_lowercase() {
        for (alias, _) in KEY_ALIASES {
            assert_eq!(*alias, alias.to_lowercase());
        }
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(normalize_key("amenity"), "amenity");
        assert_eq!(normalize_key("ADDR:STREET"), "ADDR:STREET");
    }

    #[test]
    fn test_key_classes_are_disjoint() {
        let mut seen = HashSet::new();
        for class in KeyClass::TYPED {
            for key in class.keys() {
                assert!(seen.insert(*key), "{key} is in more than one class");
            }
        }
    }

    #[test]
    fn test_classify_each_class() {
        assert_eq!(classify_key("building:levels"), KeyClass::Count);
        assert_eq!(classify_key("width"), KeyClass::Length);
        assert_eq!(classify_key("maxweight"), KeyClass::Weight);
        assert_eq!(classify_key("maxspeed"), KeyClass::Speed);
        assert_eq!(classify_key("start_date"), KeyClass::Date);
        assert_eq!(classify_key("highway"), KeyClass::Other);
    }
}
