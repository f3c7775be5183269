//! Chunking of flattened provisions for retrieval indexing.
//!
//! Provision text is split by a [`TextSplitter`]; the crate ships a
//! word-budget [`SentenceSplitter`]. Chunk size and overlap are validated up
//! front by [`ChunkConfig`], so a bad configuration fails before any text is
//! split.

mod chunker;
mod config;
mod splitter;
mod types;

pub use chunker::{document_to_chunks, law_xml_to_chunks, provision_to_chunks};
pub use config::ChunkConfig;
pub use splitter::{SentenceSplitter, TextSplitter};
pub use types::{ChunkMetadata, ChunkedLaw, TextChunk};
