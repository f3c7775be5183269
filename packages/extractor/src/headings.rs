//! Heading resolution.
//!
//! Headings in LIMS XML are not ancestors of the sections they title; they
//! are usually preceding siblings. The active heading stack at a node is
//! therefore defined by document order: a `<Heading level="N">` replaces
//! slot N and clears every deeper slot.
//!
//! [`HeadingIndex`] scans the document once and records a snapshot of the
//! slots after every heading. A lookup binary-searches the last snapshot at
//! or before the node's position.

use roxmltree::Node;

use crate::config::HEADING_LEVELS;
use crate::text::{reconstruct_text, TagVocabulary};
use crate::xml::has_tag;

/// Active heading slots, as indexes into `HeadingIndex::texts`.
type Slots = [Option<usize>; HEADING_LEVELS];

#[derive(Debug, Clone)]
struct HeadingEvent {
    /// Byte offset of the heading element in the source.
    position: usize,
    active: Slots,
}

/// Document-order index of heading transitions.
#[derive(Debug, Clone, Default)]
pub struct HeadingIndex {
    texts: Vec<String>,
    events: Vec<HeadingEvent>,
}

impl HeadingIndex {
    /// Build the index from the document root element.
    pub fn build(root: Node<'_, '_>, vocabulary: &TagVocabulary) -> Self {
        let mut index = Self::default();
        let mut active: Slots = [None; HEADING_LEVELS];

        for heading in root.descendants().filter(|n| has_tag(*n, "Heading")) {
            let level = parse_heading_level(heading.attribute("level"));
            index.texts.push(heading_text(heading, vocabulary));

            active[level - 1] = Some(index.texts.len() - 1);
            for slot in active.iter_mut().skip(level) {
                *slot = None;
            }

            index.events.push(HeadingEvent {
                position: heading.range().start,
                active,
            });
        }

        tracing::debug!(headings = index.events.len(), "Built heading index");
        index
    }

    /// Headings active at `node`, outermost first.
    ///
    /// A heading node counts as active at its own position; headings nested
    /// inside `node` come after it and are not included.
    #[must_use]
    pub fn headings_at(&self, node: Node<'_, '_>) -> Vec<String> {
        let position = node.range().start;
        let seen = self.events.partition_point(|e| e.position <= position);
        let Some(event) = seen.checked_sub(1).and_then(|i| self.events.get(i)) else {
            return Vec::new();
        };

        event
            .active
            .iter()
            .flatten()
            .filter_map(|&i| self.texts.get(i).cloned())
            .collect()
    }

    /// Number of headings in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the document has no headings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parse a heading `level` attribute.
///
/// Missing levels default to 1. Unparseable values fall back to 1 and
/// out-of-range values are clamped to `1..=HEADING_LEVELS`.
pub fn parse_heading_level(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return 1;
    };

    match raw.trim().parse::<usize>() {
        Ok(level) if (1..=HEADING_LEVELS).contains(&level) => level,
        Ok(level) => {
            tracing::warn!(level, "Heading level out of range, clamping");
            level.clamp(1, HEADING_LEVELS)
        }
        Err(_) => {
            tracing::warn!(level = %raw, "Invalid heading level, using 1");
            1
        }
    }
}

/// Heading text with strong and underline markers removed.
pub fn heading_text(node: Node<'_, '_>, vocabulary: &TagVocabulary) -> String {
    reconstruct_text(node, vocabulary)
        .replace("**", "")
        .replace("__", "")
}
