//! Error types for the extractor.
//!
//! `ExtractorError` covers the whole library surface: fatal markup parse
//! failures, chunking configuration errors and output serialization.
//! Missing optional markup is never an error; it resolves to `None`.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// XML parsing failed. No partial document is produced.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Requested chunk size is below the supported minimum.
    #[error("Chunk size must be at least {minimum} tokens, got {size}")]
    ChunkSizeTooSmall { size: usize, minimum: usize },

    /// Requested overlap does not fit inside a chunk.
    #[error("Chunk overlap ({overlap}) must be smaller than the chunk size ({chunk_size})")]
    ChunkOverlapTooLarge { overlap: usize, chunk_size: usize },

    /// The input path has no usable file name.
    #[error("Cannot derive a document id from path: '{0}'")]
    InvalidFileName(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ExtractorError {
    /// Whether this error comes from invalid caller configuration
    /// rather than from the input document.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ChunkSizeTooSmall { .. } | Self::ChunkOverlapTooLarge { .. }
        )
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
