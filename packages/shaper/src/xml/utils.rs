//! XML utility functions for navigating OSM element trees.

use roxmltree::Node;

use crate::error::{Result, ShaperError};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmdocs_shaper::xml::get_tag_name;
///
/// let xml = r#"<osm><node id="1"/></osm>"#;
/// let doc = Document::parse(xml).unwrap();
/// let node = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(node), "node");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmdocs_shaper::xml::find_children;
///
/// let xml = r#"<way><nd ref="1"/><tag k="a" v="b"/><nd ref="2"/></way>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let refs: Vec<_> = find_children(doc.root_element(), "nd").collect();
/// assert_eq!(refs.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are skipped.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get a mandatory attribute value.
///
/// # Arguments
/// * `node` - Element to read from
/// * `name` - Attribute name
/// * `owner_id` - Identifier of the enclosing element, used in the error
///
/// # Returns
/// * `Ok(value)` if the attribute is present
/// * `Err(ShaperError::MissingAttribute)` otherwise
pub fn required_attribute<'a>(
    node: Node<'a, '_>,
    name: &str,
    owner_id: Option<&str>,
) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| ShaperError::MissingAttribute {
            attribute: name.to_string(),
            element: get_tag_name(node).to_string(),
            id: owner_id.map(str::to_string),
        })
}
