//! Document-wide passes over an assigned provision tree.

use crate::references::RefCounter;
use crate::types::{Document, FlatProvision, Provision, RefCount};

/// Count the links cited by top-level sections.
///
/// Returns `(internal, external)`. A link's count is the number of sections
/// citing it; subsections are covered by their section's references, and
/// the preamble and schedules are not counted.
pub fn aggregate_references(sections: &[Provision]) -> (Vec<RefCount>, Vec<RefCount>) {
    let mut internal = RefCounter::new();
    let mut external = RefCounter::new();

    for section in sections {
        internal.record(&section.internal_refs);
        external.record(&section.external_refs);
    }

    (internal.into_counts(), external.into_counts())
}

/// Flatten a document into its chunkable provision list.
///
/// Order: the preamble and its provisions, each section followed
/// depth-first by its subsections, then the schedules. Each entry is
/// stamped with the document key, title and its position.
pub fn flatten(document: &Document) -> Vec<FlatProvision> {
    document
        .provisions()
        .enumerate()
        .map(|(index, provision)| {
            FlatProvision::project(
                provision,
                &document.doc_id,
                document.title_str.as_deref(),
                index,
            )
        })
        .collect()
}
