//! Cross-reference extraction and document-wide aggregation.

use std::collections::{HashMap, HashSet};

use roxmltree::Node;

use crate::types::{ExternalRef, InternalRef, Linked, RefCount};
use crate::xml::{get_tag_name, get_text};

/// References cited inside one subtree, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub external: Vec<ExternalRef>,
    pub internal: Vec<InternalRef>,
}

/// Extract the references cited below `node`.
///
/// External references (`XRefExternal`) carry their `link` and
/// `reference-type` attributes and their direct text. Internal references
/// (`XRefInternal`) are bare labels, so their text is the link. The node
/// itself is not inspected and nothing is deduplicated.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use clir_extractor::references::extract_references;
///
/// let xml = r#"<Section><Text>See <XRefInternal>12</XRefInternal> and the
///     <XRefExternal reference-type="act" link="C-46">Criminal Code</XRefExternal>.</Text></Section>"#;
/// let doc = Document::parse(xml).unwrap();
/// let refs = extract_references(doc.root_element());
///
/// assert_eq!(refs.internal[0].link.as_deref(), Some("12"));
/// assert_eq!(refs.external[0].link.as_deref(), Some("C-46"));
/// assert_eq!(refs.external[0].reference_type.as_deref(), Some("act"));
/// ```
pub fn extract_references(node: Node<'_, '_>) -> References {
    let mut refs = References::default();

    for current in node.descendants().skip(1).filter(|n| n.is_element()) {
        match get_tag_name(current) {
            "XRefExternal" => refs.external.push(ExternalRef {
                link: current.attribute("link").map(String::from),
                reference_type: current.attribute("reference-type").map(String::from),
                text: get_text(current),
            }),
            "XRefInternal" => refs.internal.push(InternalRef {
                link: get_text(current),
            }),
            _ => {}
        }
    }

    refs
}

/// Counts, per link, how many citing units mention it.
///
/// Each unit is recorded once with all of its references; a link cited
/// several times by the same unit counts once. Links keep the order in which
/// they were first seen.
#[derive(Debug, Default)]
pub struct RefCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl RefCounter {
    /// Create an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the references of one citing unit. References without a link
    /// are ignored.
    pub fn record<'r, R: Linked + 'r>(&mut self, refs: impl IntoIterator<Item = &'r R>) {
        let mut seen = HashSet::new();
        for link in refs.into_iter().filter_map(Linked::link) {
            if !seen.insert(link) {
                continue;
            }
            match self.counts.get_mut(link) {
                Some(count) => *count += 1,
                None => {
                    self.order.push(link.to_string());
                    self.counts.insert(link.to_string(), 1);
                }
            }
        }
    }

    /// Finish counting.
    #[must_use]
    pub fn into_counts(self) -> Vec<RefCount> {
        let Self { order, counts } = self;
        order
            .into_iter()
            .map(|link| {
                let count = counts.get(&link).copied().unwrap_or_default();
                RefCount { link, count }
            })
            .collect()
    }
}
