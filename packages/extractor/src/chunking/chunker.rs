//! Turning flattened provisions into chunk records.

use std::path::Path;

use super::config::ChunkConfig;
use super::splitter::{SentenceSplitter, TextSplitter};
use super::types::{ChunkMetadata, ChunkedLaw, TextChunk};
use crate::error::Result;
use crate::extractor::extract_document;
use crate::types::{Document, FlatProvision};

/// Split one flattened provision into chunks.
///
/// Every chunk carries the document title, the provision label and its
/// heading path.
pub fn provision_to_chunks(
    provision: &FlatProvision,
    splitter: &impl TextSplitter,
) -> Vec<TextChunk> {
    splitter
        .split_text(&provision.text)
        .into_iter()
        .map(|text| TextChunk {
            text,
            metadata: ChunkMetadata {
                file_id: provision.doc_title.clone(),
                section: provision.section_str.clone(),
                headings: provision.heading_str.clone(),
            },
        })
        .collect()
}

/// Split every chunkable provision of a document, in flattening order.
pub fn document_to_chunks(document: &Document, splitter: &impl TextSplitter) -> Vec<TextChunk> {
    document
        .all_chunkable_sections
        .iter()
        .flat_map(|provision| provision_to_chunks(provision, splitter))
        .collect()
}

/// Parse a LIMS XML file and chunk it with the default sentence splitter.
///
/// # Arguments
/// * `path` - Path to the XML file; the language comes from its location
/// * `config` - Validated chunk size and overlap
///
/// # Returns
/// The chunks, the document title and the number of flattened provisions
pub fn law_xml_to_chunks(path: &Path, config: &ChunkConfig) -> Result<ChunkedLaw> {
    let document = extract_document(path, None)?;
    let splitter = SentenceSplitter::from_config(config);
    let chunks = document_to_chunks(&document, &splitter);

    tracing::debug!(
        doc_id = %document.doc_id,
        chunks = chunks.len(),
        "Chunked document"
    );

    Ok(ChunkedLaw {
        chunks,
        file_id: document.title_str,
        num_sections: document.all_chunkable_sections.len(),
    })
}
