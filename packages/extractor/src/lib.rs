//! CLIR Extractor - Convert Canadian federal acts and regulations into
//! addressable provisions.
//!
//! This crate parses Justice Laws LIMS XML into a serializable document
//! model: a tree of provisions (sections, subsections, schedules and the
//! preamble), each with reconstructed text, a resolved heading path,
//! in-force metadata and cross-references, plus the flattened list of
//! provisions that is handed to chunking for retrieval.
//!
//! # Example
//!
//! ```
//! use clir_extractor::parse_document;
//!
//! let xml = r#"<Statute>
//!   <Identification><ShortTitle>Example Act</ShortTitle></Identification>
//!   <Body>
//!     <Heading level="1"><TitleText>General</TitleText></Heading>
//!     <Section><Label>5</Label><Text>Hello <Emphasis>world</Emphasis>.</Text></Section>
//!   </Body>
//! </Statute>"#;
//!
//! let doc = parse_document(xml, "E-1.xml", Some("eng")).unwrap();
//! let section = &doc.sections[0];
//! assert_eq!(section.label_str, "Section 5");
//! assert_eq!(section.heading_path_str, "General");
//! assert_eq!(section.text, "Hello *world*.");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (Document, Provision, FlatProvision, ...)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`text`]: Text reconstruction driven by a tag vocabulary
//! - [`headings`]: Heading resolution by document order
//! - [`references`]: Cross-reference extraction and counting
//! - [`provision`]: Provision building, identifiers and flattening
//! - [`extractor`]: Document assembly
//! - [`chunking`]: Splitting provisions into chunks
//! - [`output`]: JSON/YAML output
//! - [`cli`]: Command-line interface

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod headings;
pub mod output;
pub mod provision;
pub mod references;
pub mod text;
pub mod types;
pub mod xml;

// Re-export main functions
pub use chunking::law_xml_to_chunks;
pub use extractor::{extract_document, parse_document};

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use types::{Document, DocumentKind, FlatProvision, Provision, ProvisionKind};
