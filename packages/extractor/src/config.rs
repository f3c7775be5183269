//! Configuration constants and validation functions for the extractor.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{ExtractorError, Result};

/// Namespace of the LIMS metadata attributes.
pub const LIMS_NAMESPACE: &str = "http://justice.gc.ca/lims";

/// LIMS attribute holding the in-force start date.
pub const ATTR_IN_FORCE_START_DATE: &str = "inforce-start-date";

/// LIMS attribute holding the last amendment date.
pub const ATTR_LAST_AMENDED_DATE: &str = "lastAmendedDate";

/// LIMS attribute holding the consolidation date of the whole instrument.
pub const ATTR_CURRENT_DATE: &str = "current-date";

/// LIMS attribute holding the stable internal identifier.
pub const ATTR_LIMS_ID: &str = "id";

/// Schedule identifiers used for amendment bookkeeping, not substantive law.
///
/// - `RelatedProvs`: related provisions
/// - `NifProvs`: amendments not in force
pub const ADMINISTRATIVE_SCHEDULE_IDS: [&str; 2] = ["RelatedProvs", "NifProvs"];

/// Number of heading levels tracked by the heading resolver.
pub const HEADING_LEVELS: usize = 6;

/// Separator between headings in `heading_path_str`.
pub const HEADING_SEPARATOR: &str = " > ";

/// Smallest chunk size (in tokens) the chunker accepts.
pub const MIN_CHUNK_SIZE: usize = 50;

/// Default chunk size in tokens.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default overlap between consecutive chunks in tokens.
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Literal substitutions that map French file naming onto the English
/// identifier, so both language versions share one document id.
pub const DOCUMENT_ID_SUBSTITUTIONS: [(&str, &str); 3] =
    [("DORS-", "SOR-"), ("TR-", "SI-"), ("_ch.", "_c.")];

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate a chunking configuration.
///
/// # Returns
/// * `Ok(())` if `chunk_size >= MIN_CHUNK_SIZE` and the overlap fits in a chunk
/// * `Err(ExtractorError::ChunkSizeTooSmall)` or
///   `Err(ExtractorError::ChunkOverlapTooLarge)` otherwise
///
/// # Examples
/// ```
/// use clir_extractor::config::validate_chunk_size;
///
/// assert!(validate_chunk_size(1024, 100).is_ok());
/// assert!(validate_chunk_size(49, 0).is_err());
/// ```
pub fn validate_chunk_size(chunk_size: usize, chunk_overlap: usize) -> Result<()> {
    if chunk_size < MIN_CHUNK_SIZE {
        return Err(ExtractorError::ChunkSizeTooSmall {
            size: chunk_size,
            minimum: MIN_CHUNK_SIZE,
        });
    }
    if chunk_overlap >= chunk_size {
        return Err(ExtractorError::ChunkOverlapTooLarge {
            overlap: chunk_overlap,
            chunk_size,
        });
    }
    Ok(())
}

/// Check whether a LIMS date attribute is a real YYYY-MM-DD date.
///
/// Dates are kept as strings in the document model; this is only used to
/// flag suspicious source values.
pub fn is_valid_date(date_str: &str) -> bool {
    DATE_PATTERN.is_match(date_str)
        && chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d").is_ok()
}

/// Derive the canonical document id from a file name.
///
/// Strips the `.xml` extension and applies [`DOCUMENT_ID_SUBSTITUTIONS`].
///
/// # Examples
/// ```
/// use clir_extractor::config::derive_document_id;
///
/// assert_eq!(derive_document_id("DORS-2020-123_ch.5.xml"), "SOR-2020-123_c.5");
/// assert_eq!(derive_document_id("A-1"), "A-1");
/// ```
pub fn derive_document_id(filename: &str) -> String {
    let stem = filename.strip_suffix(".xml").unwrap_or(filename);
    DOCUMENT_ID_SUBSTITUTIONS
        .iter()
        .fold(stem.to_string(), |id, (from, to)| id.replace(from, to))
}

/// File name of `path` without the `.xml` extension.
pub fn file_stem(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.strip_suffix(".xml").unwrap_or(name).to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ExtractorError::InvalidFileName(path.display().to_string()))
}

/// Language code implied by the corpus layout (`<lang>/<kind>/<file>.xml`).
///
/// # Examples
/// ```
/// use std::path::Path;
/// use clir_extractor::config::language_from_path;
///
/// let path = Path::new("laws-lois-xml/eng/acts/A-1.xml");
/// assert_eq!(language_from_path(path), Some("eng".to_string()));
/// ```
pub fn language_from_path(path: &Path) -> Option<String> {
    path.parent()?
        .parent()?
        .file_name()?
        .to_str()
        .filter(|name| !name.is_empty())
        .map(String::from)
}
