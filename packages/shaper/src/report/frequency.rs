//! Tag key and value frequencies.

use std::collections::HashMap;
use std::path::Path;

use csv::Writer;
use serde::Serialize;
use tracing::debug;

use crate::config::validate_input_path;
use crate::error::Result;
use crate::xml::{find_children, get_tag_name, read_source, OsmReader};

/// Occurrences of one (parent, key, value) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    /// Source element name of the tag's parent (`node`, `way`, `relation`).
    pub parent: String,
    pub key: String,
    pub value: String,
    pub count: usize,
}

/// Frequency counts over every tag of supported elements.
///
/// Keys are counted as written in the source, before any normalization.
#[derive(Debug, Clone, Default)]
pub struct TagFrequency {
    keys: HashMap<String, usize>,
    pairs: HashMap<(String, String, String), usize>,
    total: usize,
}

impl TagFrequency {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one tag occurrence.
    pub fn record(&mut self, parent: &str, key: &str, value: &str) {
        *self.keys.entry(key.to_string()).or_insert(0) += 1;
        *self
            .pairs
            .entry((parent.to_string(), key.to_string(), value.to_string()))
            .or_insert(0) += 1;
        self.total += 1;
    }

    /// Total number of tags counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn unique_keys(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn unique_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// The `n` most frequent keys, most frequent first, ties by key.
    #[must_use]
    pub fn top_keys(&self, n: usize) -> Vec<(&str, usize)> {
        let mut keys: Vec<(&str, usize)> = self
            .keys
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keys.truncate(n);
        keys
    }

    /// Every (parent, key, value) count, most frequent first, ties by
    /// parent, key and value.
    #[must_use]
    pub fn pairs(&self) -> Vec<PairCount> {
        let mut pairs: Vec<PairCount> = self
            .pairs
            .iter()
            .map(|((parent, key, value), count)| PairCount {
                parent: parent.clone(),
                key: key.clone(),
                value: value.clone(),
                count: *count,
            })
            .collect();
        pairs.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| (&a.parent, &a.key, &a.value).cmp(&(&b.parent, &b.key, &b.value)))
        });
        pairs
    }

    /// The `n` most frequent (parent, key, value) combinations.
    #[must_use]
    pub fn top_pairs(&self, n: usize) -> Vec<PairCount> {
        let mut pairs = self.pairs();
        pairs.truncate(n);
        pairs
    }

    /// Write all pair counts as CSV with a `parent,key,value,count` header.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        for pair in self.pairs() {
            writer.serialize(pair)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Count the tags of every top-level `node`, `way` and `relation`.
pub fn count_tags(reader: &OsmReader<'_>) -> TagFrequency {
    let mut frequency = TagFrequency::new();

    for element in reader.element_nodes() {
        let parent = get_tag_name(element);
        for tag in find_children(element, "tag") {
            match tag.attribute("k") {
                Some(key) => {
                    frequency.record(parent, key, tag.attribute("v").unwrap_or_default());
                }
                None => debug!(
                    element_id = element.attribute("id").unwrap_or_default(),
                    "skipping tag without key"
                ),
            }
        }
    }
    frequency
}

/// Count tags in OSM XML text.
pub fn tag_frequency_xml(xml: &str) -> Result<TagFrequency> {
    let reader = OsmReader::parse(xml)?;
    Ok(count_tags(&reader))
}

/// Read an OSM XML file and count its tags.
pub fn tag_frequency_file(path: &Path) -> Result<TagFrequency> {
    validate_input_path(path)?;
    let xml = read_source(path)?;
    tag_frequency_xml(&xml)
}
