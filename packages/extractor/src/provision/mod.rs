//! Provision tree construction and document-wide passes.
//!
//! The builder turns markup into provision trees; the identifier pass then
//! assigns keys and labels, and the flatten pass produces the ordered list
//! handed to the chunker.

mod builder;
mod flatten;
mod identifiers;

pub(crate) use builder::date_attribute;
pub use builder::ProvisionBuilder;
pub use flatten::{aggregate_references, flatten};
pub use identifiers::{assign_identifiers, IdAssigner};
