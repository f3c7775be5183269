//! End-to-end integration tests for the extractor pipeline.
//!
//! Parses fixture acts and regulations laid out like the Justice Laws
//! corpus (`<lang>/<kind>/<file>.xml`) and checks the document model, the
//! flattened provision list and chunking.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use clir_extractor::chunking::{law_xml_to_chunks, ChunkConfig};
use clir_extractor::types::RefCount;
use clir_extractor::{extract_document, Document, DocumentKind, ProvisionKind};

fn fixture_path(parts: &[&str]) -> PathBuf {
    parts.iter().fold(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures"),
        |path, part| path.join(part),
    )
}

fn load_act() -> Document {
    extract_document(&fixture_path(&["eng", "acts", "T-100.xml"]), None)
        .unwrap_or_else(|e| panic!("Failed to parse act fixture: {e}"))
}

fn load_regulation() -> Document {
    extract_document(&fixture_path(&["fra", "reglements", "DORS-2020-123.xml"]), None)
        .unwrap_or_else(|e| panic!("Failed to parse regulation fixture: {e}"))
}

fn ref_counts(counts: &[RefCount]) -> Vec<(&str, usize)> {
    counts.iter().map(|r| (r.link.as_str(), r.count)).collect()
}

#[test]
fn test_act_metadata() {
    let doc = load_act();

    assert_eq!(doc.id, "T-100");
    assert_eq!(doc.lang.as_deref(), Some("eng"));
    assert_eq!(doc.doc_id, "T-100_eng");
    assert_eq!(doc.kind, DocumentKind::Act);
    assert_eq!(doc.title_str.as_deref(), Some("Test Widgets Act"));
    assert_eq!(
        doc.long_title.as_deref(),
        Some("An Act respecting the protection of test widgets")
    );
    assert_eq!(doc.bill_number.as_deref(), Some("C-100"));
    assert_eq!(doc.consolidated_number.as_deref(), Some("T-100"));
    assert_eq!(doc.in_force_start_date.as_deref(), Some("2019-06-21"));
    assert_eq!(doc.last_amended_date.as_deref(), Some("2023-03-01"));
    assert_eq!(doc.current_date.as_deref(), Some("2024-05-15"));
}

#[test]
fn test_act_preamble() {
    let doc = load_act();
    let preamble = doc.preamble.as_ref().unwrap();

    assert_eq!(preamble.global_id, "T-100_eng_preamble");
    assert_eq!(preamble.label_str, "Preamble");
    assert!(preamble.headings.is_empty());
    assert_eq!(
        preamble.text,
        "Whereas widgets are important to Canadians;\n\
         And whereas the *Criminal Code* applies;\n\
         Now, therefore, Her Majesty enacts as follows:"
    );
    assert_eq!(preamble.children.len(), 3);
    assert_eq!(preamble.children[2].global_id, "T-100_eng_preamble_provision_2");
    assert_eq!(preamble.children[2].label_str, "Preamble provision 2");
    assert_eq!(preamble.children[1].external_refs[0].link.as_deref(), Some("C-46"));
    assert_eq!(preamble.children[0].lims_id.as_deref(), Some("6"));
}

#[test]
fn test_act_sections() {
    let doc = load_act();

    // Section 4 contains a schedule and is skipped
    let labels: Vec<_> = doc.sections.iter().map(|s| s.label_str.as_str()).collect();
    assert_eq!(labels, vec!["Section 1", "Section 2", "Section 3"]);

    let short_title = &doc.sections[0];
    assert_eq!(short_title.headings, vec!["Short Title"]);
    assert_eq!(short_title.marginal_note.as_deref(), Some("Short title"));
    assert_eq!(
        short_title.text,
        "**Short title**\nThis Act may be cited as the *Test Widgets Act*."
    );
    assert_eq!(short_title.in_force_start_date.as_deref(), Some("2019-06-21"));
    assert_eq!(short_title.lims_id.as_deref(), Some("11"));
    assert_eq!(
        short_title.context_str,
        "Test Widgets Act\nSection 1\nShort Title\nThis Act may be cited as the *Test Widgets Act*."
    );

    let classification = &doc.sections[2];
    assert_eq!(classification.heading_path_str, "Widgets > Classification");
    assert_eq!(
        classification.text,
        "Widgets are classified as follows:\n\n\
         | Class | Weight |\n\
         | --- | --- |\n\
         | A | 1 kg |\n\
         | B | 2 kg |"
    );
}

#[test]
fn test_act_subsections() {
    let doc = load_act();
    let definitions = &doc.sections[1];

    assert_eq!(definitions.global_id, "T-100_eng_section_2");
    assert_eq!(definitions.last_amended_date.as_deref(), Some("2023-03-01"));
    // Only the first marginal note is excluded from the section body; the
    // subsection's own note stays in the text
    assert!(definitions
        .text
        .starts_with("**Definitions**\n**Definitions**\n(1) The following definitions apply"));
    assert!(definitions
        .text
        .ends_with("(2) Section *3* applies despite the *Criminal Code*."));

    let first = &definitions.children[0];
    assert_eq!(first.kind, ProvisionKind::Subsection);
    assert_eq!(first.global_id, "T-100_eng_subsection_2(1)");
    assert_eq!(first.parent_id.as_deref(), Some("T-100_eng_section_2"));
    assert_eq!(first.label_str, "Subsection 2(1)");
    assert_eq!(first.headings, vec!["Interpretation"]);
    assert_eq!(
        first.text,
        "**Definitions**\nThe following definitions apply in this Act.\n\
         *widget* means a device described in *3*."
    );

    let second = &definitions.children[1];
    assert_eq!(second.text, "Section *3* applies despite the *Criminal Code*.");
    assert_eq!(second.marginal_note, None);
}

#[test]
fn test_act_schedules() {
    let doc = load_act();

    // RelatedProvs is administrative and dropped
    let labels: Vec<_> = doc.schedules.iter().map(|s| s.label_str.as_str()).collect();
    assert_eq!(labels, vec!["FORM 1", "SCHEDULE"]);

    let schedule = &doc.schedules[1];
    assert_eq!(schedule.global_id, "T-100_eng_schedule_SCHEDULE");
    assert_eq!(schedule.originating_ref.as_deref(), Some("(Section 3)"));
    assert_eq!(schedule.text, "**Widget Classes** Class A widgets");
    assert!(schedule.headings.is_empty());
    assert_eq!(schedule.parent_id, None);

    assert!(doc
        .all_chunkable_sections
        .iter()
        .all(|p| !p.text.contains("RELATED PROVISIONS") && !p.text.contains("Transitional")));
}

#[test]
fn test_act_reference_counts() {
    let doc = load_act();

    assert_eq!(ref_counts(&doc.internal_refs), vec![("3", 1)]);
    assert_eq!(
        ref_counts(&doc.external_refs),
        vec![("T-100", 1), ("C-46", 1)]
    );
}

#[test]
fn test_act_flat_list() {
    let doc = load_act();

    let ids: Vec<_> = doc
        .all_chunkable_sections
        .iter()
        .map(|p| p.section_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "T-100_eng_preamble",
            "T-100_eng_preamble_provision_0",
            "T-100_eng_preamble_provision_1",
            "T-100_eng_preamble_provision_2",
            "T-100_eng_section_1",
            "T-100_eng_section_2",
            "T-100_eng_subsection_2(1)",
            "T-100_eng_subsection_2(2)",
            "T-100_eng_section_3",
            "T-100_eng_schedule_FORM 1",
            "T-100_eng_schedule_SCHEDULE",
        ]
    );

    let flat = &doc.all_chunkable_sections[6];
    assert_eq!(flat.index, 6);
    assert_eq!(flat.id.as_deref(), Some("(1)"));
    assert_eq!(flat.section_str, "Subsection 2(1)");
    assert_eq!(flat.heading_str, "Interpretation");
    assert_eq!(flat.doc_title.as_deref(), Some("Test Widgets Act"));
    assert!(flat.text.starts_with("**Definitions**\n"));
    assert!(!flat.text.starts_with("**Definitions**\n**Definitions**"));
}

#[test]
fn test_ids_unique_and_parents_resolve() {
    for doc in [load_act(), load_regulation()] {
        let ids: Vec<_> = doc.provisions().map(|p| p.global_id.as_str()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate ids in {}", doc.doc_id);

        for provision in doc.provisions() {
            if let Some(parent) = &provision.parent_id {
                assert!(
                    doc.find_provision(parent).is_some(),
                    "dangling parent {parent}"
                );
            }
        }
        assert_eq!(doc.all_chunkable_sections.len(), ids.len());
    }
}

#[test]
fn test_regulation() {
    let doc = load_regulation();

    assert_eq!(doc.id, "SOR-2020-123");
    assert_eq!(doc.filename, "DORS-2020-123");
    assert_eq!(doc.lang.as_deref(), Some("fra"));
    assert_eq!(doc.doc_id, "SOR-2020-123_fra");
    assert_eq!(doc.kind, DocumentKind::Regulation);
    assert_eq!(
        doc.title_str.as_deref(),
        Some("Règlement sur les gadgets d’essai")
    );
    assert_eq!(doc.instrument_number.as_deref(), Some("DORS/2020-123"));
    assert_eq!(doc.enabling_authority.link.as_deref(), Some("T-100"));
    assert!(doc.preamble.is_none());
    assert!(doc.schedules.is_empty());

    assert_eq!(
        doc.sections[0].text,
        "Les définitions qui suivent s’appliquent au présent règlement (voir l’article *2*)."
    );
    assert_eq!(doc.sections[0].headings, vec!["Définitions"]);

    // Two sections labelled "2": the second key is disambiguated
    let ids: Vec<_> = doc.sections.iter().map(|s| s.global_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "SOR-2020-123_fra_section_1",
            "SOR-2020-123_fra_section_2",
            "SOR-2020-123_fra_section_2_2",
        ]
    );
    assert_eq!(
        doc.sections[1].children[0].global_id,
        "SOR-2020-123_fra_subsection_2(1)"
    );
    assert_eq!(ref_counts(&doc.internal_refs), vec![("2", 1), ("1", 1)]);
}

#[test]
fn test_law_xml_to_chunks() {
    let path = fixture_path(&["eng", "acts", "T-100.xml"]);
    let chunked = law_xml_to_chunks(&path, &ChunkConfig::default()).unwrap();

    assert_eq!(chunked.file_id.as_deref(), Some("Test Widgets Act"));
    assert_eq!(chunked.num_sections, 11);
    // Every provision is short enough for a single chunk
    assert_eq!(chunked.chunks.len(), 11);

    let chunk = &chunked.chunks[4];
    assert_eq!(chunk.metadata.section, "Section 1");
    assert_eq!(chunk.metadata.headings, "Short Title");
    assert_eq!(chunk.metadata.file_id.as_deref(), Some("Test Widgets Act"));
    assert!(chunk.text.starts_with("**Short title**\n"));
}

#[test]
fn test_chunk_config_rejects_small_sizes() {
    assert!(ChunkConfig::new(49, 0).unwrap_err().is_configuration_error());
}
