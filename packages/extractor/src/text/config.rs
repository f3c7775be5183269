//! Vocabulary configuration for LIMS XML.

use super::vocabulary::TagVocabulary;

/// Create the tag vocabulary for Justice Laws LIMS XML.
///
/// ```text
/// exclude (once)   MarginalNote, Label, OriginatingRef
/// line break       Provision, Subsection, Paragraph, Definition, row,
///                  TableGroup, HistoricalNote, MarginalNote
/// paragraph break  Subsection, TableGroup
/// cell delimiter   entry
/// *emphasis*       DefinedTermEn, DefinedTermFr, XRefExternal, XRefInternal, Emphasis
/// **strong**       MarginalNote, TitleText
/// table body       tbody
/// ```
///
/// `Subsection` and `TableGroup` are in both break sets; the line break wins.
#[must_use]
pub fn create_lims_vocabulary() -> TagVocabulary {
    TagVocabulary::new()
        // Marginal notes and labels are extracted into their own fields
        .with_exclude(["MarginalNote", "Label", "OriginatingRef"])
        .with_line_breaks([
            "Provision",
            "Subsection",
            "Paragraph",
            "Definition",
            "row",
            "TableGroup",
            "HistoricalNote",
            "MarginalNote",
        ])
        .with_paragraph_breaks(["Subsection", "TableGroup"])
        .with_pipes(["entry"])
        .with_emphasis([
            "DefinedTermEn",
            "DefinedTermFr",
            "XRefExternal",
            "XRefInternal",
            "Emphasis",
        ])
        .with_strong(["MarginalNote", "TitleText"])
        .with_table_body("tbody")
}
