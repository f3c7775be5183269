//! Recursive construction of provision trees from LIMS markup.

use roxmltree::Node;

use crate::config::{
    is_valid_date, ADMINISTRATIVE_SCHEDULE_IDS, ATTR_IN_FORCE_START_DATE, ATTR_LAST_AMENDED_DATE,
    ATTR_LIMS_ID,
};
use crate::headings::HeadingIndex;
use crate::references::extract_references;
use crate::text::{reconstruct_text, TagVocabulary};
use crate::types::{Provision, ProvisionKind};
use crate::xml::{
    find_child, find_descendant, find_descendants, get_lims_attribute, get_tag_name, get_text,
    has_descendant,
};

/// Elements that delimit provisions. A subsection belongs to the nearest
/// enclosing element with one of these tags.
const STRUCTURAL_CONTAINERS: [&str; 5] =
    ["Section", "Subsection", "Schedule", "Preamble", "Provision"];

/// Builds provisions from markup subtrees.
///
/// Holds the text vocabulary and the document's heading index; both are
/// shared by every node built from the same document. Identifier and label
/// fields are left empty for the identifier pass.
pub struct ProvisionBuilder<'a> {
    vocabulary: &'a TagVocabulary,
    headings: &'a HeadingIndex,
}

impl<'a> ProvisionBuilder<'a> {
    /// Create a builder for one document.
    #[must_use]
    pub fn new(vocabulary: &'a TagVocabulary, headings: &'a HeadingIndex) -> Self {
        Self {
            vocabulary,
            headings,
        }
    }

    /// Build a section and its subsections.
    ///
    /// Returns `None` when the section contains a schedule: the schedule is
    /// built on its own and must not be counted twice.
    pub fn build_section(&self, node: Node<'_, '_>) -> Option<Provision> {
        self.build_numbered(node, ProvisionKind::Section)
    }

    /// Build a schedule.
    ///
    /// Returns `None` for the administrative `RelatedProvs` and `NifProvs`
    /// schedules. Schedules carry no headings and no children.
    pub fn build_schedule(&self, node: Node<'_, '_>) -> Option<Provision> {
        if let Some(id) = node
            .attribute("id")
            .filter(|id| ADMINISTRATIVE_SCHEDULE_IDS.contains(id))
        {
            tracing::debug!(id = %id, "Skipping administrative schedule");
            return None;
        }

        let mut provision = self.base(node, ProvisionKind::Schedule);
        provision.local_id = find_descendant(node, "Label").and_then(get_text);
        provision.marginal_note = find_descendant(node, "MarginalNote").and_then(get_text);
        provision.originating_ref = find_descendant(node, "OriginatingRef").and_then(get_text);
        Some(provision)
    }

    /// Build the synthetic preamble provision.
    ///
    /// Its children are the preamble's `Provision` elements, numbered from 0
    /// in document order.
    pub fn build_preamble(&self, node: Node<'_, '_>) -> Provision {
        let mut preamble = self.base(node, ProvisionKind::Preamble);
        preamble.local_id = Some("preamble".to_string());
        preamble.headings = self.headings.headings_at(node);

        preamble.children = find_descendants(node, "Provision")
            .enumerate()
            .map(|(ordinal, child)| {
                let mut provision = self.base(child, ProvisionKind::PreambleProvision);
                provision.local_id = Some(ordinal.to_string());
                provision.headings = self.headings.headings_at(child);
                provision
            })
            .collect();

        preamble
    }

    fn build_numbered(&self, node: Node<'_, '_>, kind: ProvisionKind) -> Option<Provision> {
        if has_descendant(node, "Schedule") {
            tracing::debug!(
                tag = %get_tag_name(node),
                label = ?find_child(node, "Label").and_then(get_text),
                "Skipping provision that contains a schedule"
            );
            return None;
        }

        let mut provision = self.base(node, kind);
        provision.local_id = find_child(node, "Label").and_then(get_text);
        provision.marginal_note = find_child(node, "MarginalNote").and_then(get_text);
        provision.headings = self.headings.headings_at(node);
        provision.children = owned_subsections(node)
            .into_iter()
            .filter_map(|child| self.build_numbered(child, ProvisionKind::Subsection))
            .collect();

        Some(provision)
    }

    /// Fields every provision kind reads the same way: text, dates, LIMS id
    /// and references.
    fn base(&self, node: Node<'_, '_>, kind: ProvisionKind) -> Provision {
        let refs = extract_references(node);
        let mut provision = Provision::new(kind, reconstruct_text(node, self.vocabulary));
        provision.in_force_start_date = date_attribute(node, ATTR_IN_FORCE_START_DATE);
        provision.last_amended_date = date_attribute(node, ATTR_LAST_AMENDED_DATE);
        provision.lims_id = get_lims_attribute(node, ATTR_LIMS_ID);
        provision.internal_refs = refs.internal;
        provision.external_refs = refs.external;
        provision
    }
}

/// Read a LIMS date attribute, warning about values that are not dates.
///
/// The raw value is kept either way.
pub(crate) fn date_attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    let value = get_lims_attribute(node, name)?;
    if !is_valid_date(&value) {
        tracing::warn!(attribute = name, value = %value, "Unexpected date format");
    }
    Some(value)
}

fn is_structural(node: Node<'_, '_>) -> bool {
    node.is_element() && STRUCTURAL_CONTAINERS.contains(&get_tag_name(node))
}

/// Subsections whose nearest structural ancestor is `node`.
fn owned_subsections<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    find_descendants(node, "Subsection")
        .filter(|sub| sub.ancestors().skip(1).find(|a| is_structural(*a)) == Some(node))
        .collect()
}
