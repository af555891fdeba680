//! JSON writer for document sequences.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::validate_output_path;
use crate::document::Document;
use crate::error::Result;

/// Generate a JSON array string from a sequence of documents.
///
/// With `pretty` the array is indented two spaces per level; otherwise it is
/// written on a single line.
pub fn generate_json(documents: &[Document], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(documents)?
    } else {
        serde_json::to_string(documents)?
    };
    Ok(format!("{json}\n"))
}

/// Save documents as one JSON array file.
///
/// Writes to a hidden temp file next to the target, syncs it, then renames,
/// so an interrupted run never leaves a truncated output behind.
///
/// # Arguments
/// * `documents` - Documents in output order
/// * `output` - Target file path; its parent directory must exist
/// * `pretty` - Indent the output
///
/// # Returns
/// Path to the saved file
pub fn save_json(documents: &[Document], output: &Path, pretty: bool) -> Result<PathBuf> {
    validate_output_path(output)?;

    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = output.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut writer = BufWriter::new(File::create(&temp_file)?);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, documents)?;
        } else {
            serde_json::to_writer(&mut writer, documents)?;
        }
        writer.write_all(b"\n")?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if output.exists() {
        fs::remove_file(output)?;
    }

    fs::rename(&temp_file, output)?;

    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaper::shape_xml;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    const XML: &str = r#"<osm>
  <node id="1" lat="51.5" lon="-0.1" user="a" uid="7" timestamp="2010-01-01T00:00:00Z">
    <tag k="highway" v="crossing"/>
  </node>
  <way id="2" user="b" uid="8" timestamp="2011-01-01T00:00:00Z">
    <nd ref="1"/><nd ref="3"/>
    <tag k="lanes" v="2"/>
  </way>
</osm>"#;

    fn documents() -> Vec<Document> {
        shape_xml(XML).unwrap().documents
    }

    #[test]
    fn test_generate_json_compact() {
        let json = generate_json(&documents(), false).unwrap();

        assert_eq!(json.lines().count(), 1);
        assert!(json.starts_with(r#"[{"element_type":"point","_id":"1""#));
    }

    #[test]
    fn test_generate_json_pretty() {
        let json = generate_json(&documents(), true).unwrap();

        assert!(json.starts_with("[\n  {\n    \"element_type\": \"point\""));
        assert!(json.ends_with("]\n"));
    }

    #[test]
    fn test_generate_json_empty() {
        assert_eq!(generate_json(&[], false).unwrap(), "[]\n");
    }

    #[test]
    fn test_save_json() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("data.json");

        let path = save_json(&documents(), &output, false).unwrap();
        assert_eq!(path, output);
        assert!(!temp_dir.path().join(".data.json.tmp").exists());

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value[1],
            json!({
                "element_type": "line",
                "_id": "2",
                "user": "b",
                "uid": "8",
                "created": "2011-01-01T00:00:00",
                "nodes": ["1", "3"],
                "lanes": 2
            })
        );
    }

    #[test]
    fn test_save_json_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("missing").join("data.json");
        assert!(save_json(&documents(), &output, false).is_err());
    }
}
