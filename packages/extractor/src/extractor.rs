//! Document assembly: parse one LIMS file into a [`Document`].

use std::fs;
use std::path::Path;

use roxmltree::{Node, ParsingOptions};

use crate::config::{
    derive_document_id, file_stem, language_from_path, ATTR_CURRENT_DATE,
    ATTR_IN_FORCE_START_DATE, ATTR_LAST_AMENDED_DATE,
};
use crate::error::Result;
use crate::headings::HeadingIndex;
use crate::provision::{
    aggregate_references, assign_identifiers, date_attribute, flatten, ProvisionBuilder,
};
use crate::text::create_lims_vocabulary;
use crate::types::{Document, DocumentKind, EnablingAuthority};
use crate::xml::{
    find_by_path, find_descendant, find_descendants, get_tag_name, get_text, get_text_content,
};

/// Parse a LIMS XML file from disk.
///
/// # Arguments
/// * `path` - Path to the XML file, e.g. `laws-lois-xml/eng/acts/A-1.xml`
/// * `language` - Language code; defaults to the grandparent directory name
///
/// # Returns
/// The parsed `Document`, or an error if the file cannot be read or parsed
pub fn extract_document(path: &Path, language: Option<&str>) -> Result<Document> {
    let filename = file_stem(path)?;
    let language = language
        .map(String::from)
        .or_else(|| language_from_path(path));

    tracing::debug!(path = %path.display(), lang = ?language, "Reading document");
    let xml = read_lossy(path)?;
    parse_document(&xml, &filename, language.as_deref())
}

/// Parse LIMS XML into a [`Document`].
///
/// Builds the heading index once, then the preamble, sections and
/// schedules, and finally runs the identifier, aggregation and flatten
/// passes.
///
/// # Arguments
/// * `xml` - Full XML source
/// * `filename` - Source file name, with or without `.xml`
/// * `language` - Language code, if known
///
/// # Examples
/// ```
/// use clir_extractor::parse_document;
///
/// let xml = r#"<Statute><Identification><ShortTitle>Test Act</ShortTitle></Identification>
///   <Body><Section><Label>1</Label><Text>Hello.</Text></Section></Body></Statute>"#;
/// let doc = parse_document(xml, "T-1.xml", Some("eng")).unwrap();
///
/// assert_eq!(doc.doc_id, "T-1_eng");
/// assert_eq!(doc.sections[0].global_id, "T-1_eng_section_1");
/// assert_eq!(doc.all_chunkable_sections.len(), 1);
/// ```
pub fn parse_document(xml: &str, filename: &str, language: Option<&str>) -> Result<Document> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let tree = roxmltree::Document::parse_with_options(xml, options)?;
    let root = tree.root_element();

    let vocabulary = create_lims_vocabulary();
    let headings = HeadingIndex::build(root, &vocabulary);
    let builder = ProvisionBuilder::new(&vocabulary, &headings);

    let filename = filename.strip_suffix(".xml").unwrap_or(filename).to_string();
    let id = derive_document_id(&filename);
    let doc_id = match language {
        Some(lang) => format!("{id}_{lang}"),
        None => id.clone(),
    };

    let short_title = descendant_text(root, "ShortTitle");
    let long_title = descendant_text(root, "LongTitle");
    let title_str = short_title.clone().or_else(|| long_title.clone());

    let mut preamble = find_descendant(root, "Preamble").map(|node| builder.build_preamble(node));
    let mut sections: Vec<_> = find_descendants(root, "Section")
        .filter_map(|node| builder.build_section(node))
        .collect();
    let mut schedules: Vec<_> = find_descendants(root, "Schedule")
        .filter_map(|node| builder.build_schedule(node))
        .collect();

    assign_identifiers(
        &doc_id,
        title_str.as_deref(),
        preamble.as_mut(),
        &mut sections,
        &mut schedules,
    );
    let (internal_refs, external_refs) = aggregate_references(&sections);

    let mut document = Document {
        id,
        lang: language.map(String::from),
        filename,
        kind: DocumentKind::from_root_tag(get_tag_name(root)),
        short_title,
        long_title,
        bill_number: descendant_text(root, "BillNumber"),
        instrument_number: descendant_text(root, "InstrumentNumber"),
        consolidated_number: descendant_text(root, "ConsolidatedNumber"),
        last_amended_date: date_attribute(root, ATTR_LAST_AMENDED_DATE),
        current_date: date_attribute(root, ATTR_CURRENT_DATE),
        in_force_start_date: date_attribute(root, ATTR_IN_FORCE_START_DATE),
        enabling_authority: enabling_authority(root),
        preamble,
        sections,
        schedules,
        internal_refs,
        external_refs,
        doc_id,
        title_str,
        all_chunkable_sections: Vec::new(),
    };
    document.all_chunkable_sections = flatten(&document);

    tracing::debug!(
        doc_id = %document.doc_id,
        sections = document.sections.len(),
        schedules = document.schedules.len(),
        preamble = document.preamble.is_some(),
        chunkable = document.all_chunkable_sections.len(),
        "Parsed document"
    );

    Ok(document)
}

/// Read a file as UTF-8, replacing invalid sequences.
fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(xml) => xml,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "File is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}

/// Collapsed text of the first descendant with the given tag.
fn descendant_text(root: Node<'_, '_>, tag: &str) -> Option<String> {
    find_descendant(root, tag).and_then(get_text_content)
}

fn enabling_authority(root: Node<'_, '_>) -> EnablingAuthority {
    match find_by_path(root, "EnablingAuthority/XRefExternal") {
        Some(xref) => EnablingAuthority {
            link: xref.attribute("link").map(String::from),
            text: get_text(xref),
        },
        None => EnablingAuthority::default(),
    }
}
