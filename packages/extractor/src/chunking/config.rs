//! Chunking configuration.

use serde::Serialize;

use crate::config::{validate_chunk_size, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::error::Result;

/// Validated chunk size and overlap, both in tokens.
///
/// Only constructible through [`ChunkConfig::new`] or `Default`, so a
/// value of this type is always usable by a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkConfig {
    /// Create a chunking configuration.
    ///
    /// # Returns
    /// * `Err(ExtractorError::ChunkSizeTooSmall)` if `chunk_size` is below 50
    /// * `Err(ExtractorError::ChunkOverlapTooLarge)` if the overlap does not
    ///   fit in a chunk
    ///
    /// # Examples
    /// ```
    /// use clir_extractor::chunking::ChunkConfig;
    ///
    /// let config = ChunkConfig::new(512, 50).unwrap();
    /// assert_eq!(config.chunk_size(), 512);
    /// assert!(ChunkConfig::new(10, 0).is_err());
    /// ```
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_chunk_size(chunk_size, chunk_overlap)?;
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Maximum tokens per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Tokens shared between consecutive chunks.
    #[must_use]
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}
