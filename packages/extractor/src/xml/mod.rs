//! XML utilities.

mod utils;

pub use utils::{
    find_by_path, find_child, find_descendant, find_descendants, get_lims_attribute, get_tag_name,
    get_text, get_text_content, has_descendant, has_tag,
};
