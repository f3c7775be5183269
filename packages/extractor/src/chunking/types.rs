//! Chunk records handed to indexing.

use serde::{Deserialize, Serialize};

/// Metadata attached to every chunk of a provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Title of the owning document.
    pub file_id: Option<String>,

    /// Provision label, e.g. "Subsection 5(1)".
    pub section: String,

    /// Heading path, e.g. "Part I > Interpretation".
    pub headings: String,
}

/// One window of provision text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// All chunks of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedLaw {
    pub chunks: Vec<TextChunk>,

    /// Document title, shared by every chunk's metadata.
    pub file_id: Option<String>,

    /// Number of flattened provisions that were chunked.
    pub num_sections: usize,
}
