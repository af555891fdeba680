//! Configuration constants and validation functions for the shaper.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Result, ShaperError};

/// Default file name for the shaped JSON output.
pub const DEFAULT_OUTPUT_FILE: &str = "data.json";

/// Default number of rows shown per section of the tag frequency report.
pub const DEFAULT_TOP_N: usize = 10;

/// Element names that are shaped into documents.
pub const SUPPORTED_ELEMENTS: [&str; 3] = ["node", "way", "relation"];

/// Child element names the audit pass knows how to check.
pub const SUPPORTED_SUBELEMENTS: [&str; 3] = ["tag", "nd", "member"];

/// Edit timestamp format used by OSM exports (e.g. `2008-02-09T11:34:42Z`).
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// ISO-8601 format for timestamps written to documents.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One international foot in meters.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// One international inch in meters.
pub const METERS_PER_INCH: f64 = 0.0254;

/// Namespaced tag key: `main:sub`, where `sub` may contain further colons.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static NAMESPACED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]+:[A-Za-z_:]*$").expect("valid regex"));

/// Numeric OSM identifier: one or more ASCII digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static NUMERIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Check whether a canonical key has the `main:sub` namespace shape.
///
/// # Examples
/// ```
/// use osmdocs_shaper::config::is_namespaced;
///
/// assert!(is_namespaced("address:street"));
/// assert!(is_namespaced("seamark:light:colour"));
/// assert!(!is_namespaced("highway"));
/// assert!(!is_namespaced("name:1"));
/// ```
pub fn is_namespaced(key: &str) -> bool {
    NAMESPACED_KEY.is_match(key)
}

/// Validate that an input path points to an existing regular file.
///
/// # Returns
/// * `Ok(())` if the file exists
/// * `Err(ShaperError::InvalidInput)` otherwise
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ShaperError::InvalidInput(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(ShaperError::InvalidInput(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Validate that the parent directory of an output path exists.
pub fn validate_output_path(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(ShaperError::InvalidInput(format!(
                "Output directory does not exist: {}",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_pattern() {
        assert!(is_namespaced("addr:street"));
        assert!(is_namespaced("building:min_level"));
        assert!(is_namespaced("_x:y"));
        assert!(is_namespaced("address:"));
        assert!(!is_namespaced(":street"));
        assert!(!is_namespaced("lanes"));
        assert!(!is_namespaced("name:en-gb"));
        assert!(!is_namespaced("address: accessvia"));
    }

    #[test]
    fn test_numeric_id() {
        assert!(NUMERIC_ID.is_match("527862206"));
        assert!(!NUMERIC_ID.is_match("-12"));
        assert!(!NUMERIC_ID.is_match(""));
    }

    #[test]
    fn test_validate_input_path_missing() {
        let err = validate_input_path(Path::new("/definitely/not/here.osm")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_output_path_bare_file_name() {
        assert!(validate_output_path(Path::new("data.json")).is_ok());
        assert!(validate_output_path(Path::new("/definitely/not/here/data.json")).is_err());
    }
}
