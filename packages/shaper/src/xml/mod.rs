//! OSM XML reading.

mod reader;
mod utils;

pub use reader::{read_element, read_source, OsmReader};
pub use utils::{element_children, find_children, get_tag_name, required_attribute};
