//! Core data types for the extractor.
//!
//! These types represent Canadian federal acts and regulations and their
//! addressable provisions. Every type is serde-serializable and contains
//! only strings, numbers, lists and nested records.

use serde::{Deserialize, Serialize};

/// Kind of legal instrument, derived from the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// An act of Parliament (`<Statute>` root).
    Act,
    /// A regulation or other statutory instrument.
    Regulation,
}

impl DocumentKind {
    /// Classify a document by its root tag name.
    #[must_use]
    pub fn from_root_tag(tag: &str) -> Self {
        if tag == "Statute" {
            Self::Act
        } else {
            Self::Regulation
        }
    }

    /// Get the string value used in output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Act => "act",
            Self::Regulation => "regulation",
        }
    }
}

/// The kind of an addressable provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionKind {
    Section,
    Subsection,
    Schedule,
    Preamble,
    PreambleProvision,
}

impl ProvisionKind {
    /// Segment used when composing a `global_id`.
    #[must_use]
    pub fn id_segment(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Schedule => "schedule",
            Self::Preamble => "preamble",
            Self::PreambleProvision => "preamble_provision",
        }
    }
}

/// A citation to another provision of the same body of law.
///
/// Internal citations are bare labels, so the link is the cited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalRef {
    pub link: Option<String>,
}

/// A citation to another instrument or resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    /// Explicit link target (`link` attribute).
    pub link: Option<String>,

    /// Reference type (`reference-type` attribute), e.g. "act" or "regulation".
    pub reference_type: Option<String>,

    /// Cited text.
    pub text: Option<String>,
}

/// Anything that can point at a link target.
pub trait Linked {
    /// The link target, if any.
    fn link(&self) -> Option<&str>;
}

impl Linked for InternalRef {
    fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

impl Linked for ExternalRef {
    fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// A unique link target with its number of citing sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefCount {
    pub link: String,
    pub count: usize,
}

/// The instrument's enabling authority (regulations only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablingAuthority {
    pub link: Option<String>,
    pub text: Option<String>,
}

/// An addressable unit of law: section, subsection, schedule, preamble or
/// preamble provision.
///
/// The builder fills in content fields; identifier and label fields are
/// assigned afterwards by the identifier pass over the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub kind: ProvisionKind,

    /// Raw label as found in markup (e.g. "5", "(a)", "SCHEDULE I").
    pub local_id: Option<String>,

    /// Document-unique key, e.g. "A-1_eng_section_5".
    pub global_id: String,

    /// `global_id` of the logical parent.
    pub parent_id: Option<String>,

    /// Active headings, outermost first.
    pub headings: Vec<String>,

    /// Headings joined with " > ".
    pub heading_path_str: String,

    /// Human-readable label, e.g. "Subsection 5(1)".
    pub label_str: String,

    pub marginal_note: Option<String>,

    /// Reconstructed text, prefixed with the bold marginal note if any.
    pub text: String,

    pub in_force_start_date: Option<String>,
    pub last_amended_date: Option<String>,
    pub internal_refs: Vec<InternalRef>,
    pub external_refs: Vec<ExternalRef>,
    pub lims_id: Option<String>,

    /// Source of a schedule (e.g. "(Section 2)").
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub originating_ref: Option<String>,

    /// Title, label, heading path and body joined by newlines.
    pub context_str: String,

    pub children: Vec<Provision>,
}

impl Provision {
    /// Create a provision with only its kind and body text set.
    #[must_use]
    pub fn new(kind: ProvisionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            local_id: None,
            global_id: String::new(),
            parent_id: None,
            headings: Vec::new(),
            heading_path_str: String::new(),
            label_str: String::new(),
            marginal_note: None,
            text: text.into(),
            in_force_start_date: None,
            last_amended_date: None,
            internal_refs: Vec::new(),
            external_refs: Vec::new(),
            lims_id: None,
            originating_ref: None,
            context_str: String::new(),
            children: Vec::new(),
        }
    }

    /// Set the local label.
    #[must_use]
    pub fn with_local_id(mut self, local_id: impl Into<String>) -> Self {
        self.local_id = Some(local_id.into());
        self
    }

    /// Set the child provisions.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Provision>) -> Self {
        self.children = children;
        self
    }

    /// Iterate over this provision and all its descendants, depth-first.
    pub fn iter(&self) -> impl Iterator<Item = &Provision> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

/// A provision reduced to the fields handed to the chunker.
///
/// Built once at flatten time from a full [`Provision`]; field names follow
/// the downstream record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatProvision {
    pub section_id: String,
    pub parent_id: Option<String>,
    pub section_str: String,
    pub heading_str: String,
    pub text: String,
    pub id: Option<String>,
    pub marginal_note: Option<String>,
    pub in_force_start_date: Option<String>,
    pub last_amended_date: Option<String>,
    pub internal_refs: Vec<InternalRef>,
    pub external_refs: Vec<ExternalRef>,
    pub lims_id: Option<String>,
    pub doc_id: String,
    pub doc_title: Option<String>,
    pub index: usize,
}

impl FlatProvision {
    /// Project a provision into a flat record at position `index`.
    #[must_use]
    pub fn project(
        provision: &Provision,
        doc_id: &str,
        doc_title: Option<&str>,
        index: usize,
    ) -> Self {
        Self {
            section_id: provision.global_id.clone(),
            parent_id: provision.parent_id.clone(),
            section_str: provision.label_str.clone(),
            heading_str: provision.heading_path_str.clone(),
            text: provision.text.clone(),
            id: provision.local_id.clone(),
            marginal_note: provision.marginal_note.clone(),
            in_force_start_date: provision.in_force_start_date.clone(),
            last_amended_date: provision.last_amended_date.clone(),
            internal_refs: provision.internal_refs.clone(),
            external_refs: provision.external_refs.clone(),
            lims_id: provision.lims_id.clone(),
            doc_id: doc_id.to_string(),
            doc_title: doc_title.map(String::from),
            index,
        }
    }
}

/// One parsed legal instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Canonical, language-independent id (e.g. "SOR-2020-123").
    pub id: String,

    /// Language code, e.g. "eng" or "fra".
    pub lang: Option<String>,

    /// Source file name without extension.
    pub filename: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    pub short_title: Option<String>,
    pub long_title: Option<String>,
    pub bill_number: Option<String>,
    pub instrument_number: Option<String>,
    pub consolidated_number: Option<String>,
    pub last_amended_date: Option<String>,
    pub current_date: Option<String>,
    pub in_force_start_date: Option<String>,
    pub enabling_authority: EnablingAuthority,

    pub preamble: Option<Provision>,
    pub sections: Vec<Provision>,
    pub schedules: Vec<Provision>,

    /// Document-wide internal reference counts (sections only).
    pub internal_refs: Vec<RefCount>,

    /// Document-wide external reference counts (sections only).
    pub external_refs: Vec<RefCount>,

    /// Language-qualified key used as the prefix of every `global_id`.
    pub doc_id: String,

    /// Short title if present, else long title.
    pub title_str: Option<String>,

    /// Every provision flattened in chunking order.
    pub all_chunkable_sections: Vec<FlatProvision>,
}

impl Document {
    /// Iterate over every provision in flattening order: preamble tree,
    /// section trees, then schedules.
    pub fn provisions(&self) -> impl Iterator<Item = &Provision> {
        self.preamble
            .iter()
            .chain(self.sections.iter())
            .chain(self.schedules.iter())
            .flat_map(|provision| provision.iter())
    }

    /// Find a provision by its `global_id`.
    #[must_use]
    pub fn find_provision(&self, global_id: &str) -> Option<&Provision> {
        self.provisions().find(|p| p.global_id == global_id)
    }
}
