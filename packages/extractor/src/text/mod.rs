//! Text reconstruction for LIMS markup.
//!
//! Flattens mixed-content subtrees into line-oriented text with inline
//! stylization markers (`*em*`, `**strong**`, `__underline__`) and a
//! lightweight pipe-table notation. Tag handling is driven by a
//! [`TagVocabulary`].

mod config;
mod reconstruct;
mod vocabulary;

pub use config::create_lims_vocabulary;
pub use reconstruct::reconstruct_text;
pub use vocabulary::{ExcludeOnce, Stylization, TagVocabulary};
