//! Tag collection: lowercase keys, first occurrence wins.

use std::collections::HashSet;

use crate::types::RawTag;

/// Collect an element's tags into `(lowercased key, value)` pairs.
///
/// Document order is preserved. When several tags share a lowercased key
/// only the first is kept; later ones are dropped, not merged.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::collect_tags;
/// use osmdocs_shaper::types::RawTag;
///
/// let tags = [RawTag::new("Name", "A"), RawTag::new("name", "B")];
/// assert_eq!(collect_tags(&tags), vec![("name".to_string(), "A".to_string())]);
/// ```
pub fn collect_tags(tags: &[RawTag]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut collected = Vec::with_capacity(tags.len());

    for tag in tags {
        let key = tag.key.to_lowercase();
        if seen.insert(key.clone()) {
            collected.push((key, tag.value.clone()));
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_document_order() {
        let tags = [
            RawTag::new("highway", "crossing"),
            RawTag::new("Lit", "no"),
            RawTag::new("crossing", "zebra"),
        ];
        let keys: Vec<String> = collect_tags(&tags).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["highway", "lit", "crossing"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tags = [
            RawTag::new("ADDR:STREET", "High St"),
            RawTag::new("addr:street", "Low St"),
        ];
        assert_eq!(
            collect_tags(&tags),
            vec![("addr:street".to_string(), "High St".to_string())]
        );
    }

    #[test]
    fn test_no_tags() {
        assert!(collect_tags(&[]).is_empty());
    }
}
