//! Tree passes that run before sentence tagging.
//!
//! - **`lists`**: wraps inline runs inside `<li>` in pseudo-paragraphs
//! - **`ids`**: numbers every element in pre-order

pub mod ids;
pub mod lists;

pub use ids::{ID_PREFIX, assign_structural_ids};
pub use lists::{PSEUDO_PARAGRAPH, normalize_lists};

/// Zero-pad width for `count` identifiers: at least three digits, and wide
/// enough that lexicographic order matches numeric order.
pub fn pad_width(count: usize) -> usize {
    count.to_string().len().max(3)
}
