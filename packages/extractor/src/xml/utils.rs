//! XML utility functions for navigating and extracting data from LIMS trees.

use roxmltree::Node;

use crate::config::LIMS_NAMESPACE;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use clir_extractor::xml::get_tag_name;
///
/// let xml = r#"<Statute><Section/></Statute>"#;
/// let doc = Document::parse(xml).unwrap();
/// let section = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(section), "Section");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use clir_extractor::xml::find_child;
///
/// let xml = r#"<Section><Label>5</Label><Text/></Section>"#;
/// let doc = Document::parse(xml).unwrap();
/// let section = doc.root_element();
///
/// assert!(find_child(section, "Label").is_some());
/// assert!(find_child(section, "MarginalNote").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find the first descendant element (in document order) with the given tag
/// name. The node itself is not considered.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| has_tag(*n, tag))
}

/// All descendant elements with the given tag name, in document order.
/// The node itself is not included.
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| has_tag(*n, tag))
}

/// Check whether any descendant element has the given tag name.
pub fn has_descendant(node: Node<'_, '_>, tag: &str) -> bool {
    find_descendant(node, tag).is_some()
}

/// Find a descendant element matching a path of tag names.
///
/// The first segment is searched among all descendants, the remaining
/// segments among direct children (`.//A/B`).
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use clir_extractor::xml::find_by_path;
///
/// let xml = r#"<Statute><Identification><EnablingAuthority>
///     <XRefExternal link="C-46">Criminal Code</XRefExternal>
/// </EnablingAuthority></Identification></Statute>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let xref = find_by_path(doc.root_element(), "EnablingAuthority/XRefExternal");
/// assert_eq!(xref.and_then(|n| n.attribute("link")), Some("C-46"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut parts = path.split('/');
    let first = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    node.descendants()
        .skip(1)
        .filter(|n| has_tag(*n, first))
        .find_map(|start| {
            let mut current = start;
            for part in &rest {
                current = find_child(current, part)?;
            }
            Some(current)
        })
}

/// Get the direct text of a node, trimmed.
///
/// # Returns
/// Trimmed text, or `None` if the node has no non-whitespace direct text
pub fn get_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Get the full text content of a node (all descendant text nodes) with
/// runs of whitespace collapsed to a single space.
pub fn get_text_content(node: Node<'_, '_>) -> Option<String> {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(collapsed).filter(|s| !s.is_empty())
}

/// Get a LIMS-namespaced attribute (e.g. `lims:inforce-start-date`).
pub fn get_lims_attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute((LIMS_NAMESPACE, name)).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:Statute xmlns:ns="http://example.com"><ns:Section/></ns:Statute>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "Statute");
    }

    #[test]
    fn test_find_child_is_direct_only() {
        let xml = r#"<Section><Text><Label>inner</Label></Text></Section>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_child(doc.root_element(), "Label").is_none());
        assert!(find_descendant(doc.root_element(), "Label").is_some());
    }

    #[test]
    fn test_find_descendant_skips_self() {
        let xml = r#"<Schedule><Body/></Schedule>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(!has_descendant(doc.root_element(), "Schedule"));
    }

    #[test]
    fn test_find_descendants_document_order() {
        let xml = r#"<Body><A>1</A><B><A>2</A></B><A>3</A></Body>"#;
        let doc = Document::parse(xml).unwrap();
        let texts: Vec<_> = find_descendants(doc.root_element(), "A")
            .filter_map(get_text)
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_by_path_requires_direct_child() {
        let xml = r#"<Statute>
            <EnablingAuthority><Text><XRefExternal>nested</XRefExternal></Text></EnablingAuthority>
        </Statute>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_by_path(doc.root_element(), "EnablingAuthority/XRefExternal").is_none());
    }

    #[test]
    fn test_get_text() {
        let xml = r#"<Label>  5  </Label>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_text(doc.root_element()), Some("5".to_string()));

        let doc = Document::parse("<Label>   </Label>").unwrap();
        assert_eq!(get_text(doc.root_element()), None);
    }

    #[test]
    fn test_get_text_content() {
        let xml = "<LongTitle>An Act respecting\n   <XRefExternal>firearms</XRefExternal> and other weapons</LongTitle>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            get_text_content(doc.root_element()),
            Some("An Act respecting firearms and other weapons".to_string())
        );
    }

    #[test]
    fn test_find_by_path_with_owned_path() {
        let xml = r#"<Regulation><Identification><EnablingAuthority>
            <XRefExternal link="T-100">Widgets Act</XRefExternal>
        </EnablingAuthority></Identification></Regulation>"#;
        let doc = Document::parse(xml).unwrap();
        let path = ["EnablingAuthority", "XRefExternal"].join("/");

        let xref = find_by_path(doc.root_element(), &path).unwrap();
        assert_eq!(xref.attribute("link"), Some("T-100"));
        assert!(find_by_path(doc.root_element(), &format!("{path}/Missing")).is_none());
        assert!(find_by_path(doc.root_element(), "EnablingAuthority/Text").is_none());
    }

    #[test]
    fn test_get_lims_attribute() {
        let xml = r#"<Section xmlns:lims="http://justice.gc.ca/lims" lims:id="123" id="plain"/>"#;
        let doc = Document::parse(xml).unwrap();
        let section = doc.root_element();

        assert_eq!(get_lims_attribute(section, "id"), Some("123".to_string()));
        assert_eq!(get_lims_attribute(section, "missing"), None);
    }
}
