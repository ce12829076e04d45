//! # Markup-Preserving Sentence Segmentation
//!
//! Splits one block's HTML into sentence-sized HTML fragments without losing
//! or moving any tag, alongside the plain text of each sentence.
//!
//! ## Pipeline
//!
//! 1. **`tags`**: strip tags, remembering each tag's offset in the stripped text
//! 2. **`boundaries`**: find sentence ranges in the stripped text
//! 3. **`reassemble`**: walk the text, splicing tags back and cutting at ranges
//!
//! The block's own wrapper tags (first and last occurrence) are left out of
//! reconstruction; the caller writes the wrapper itself.

pub mod boundaries;
pub mod reassemble;
pub mod tags;

pub use boundaries::{SentenceRange, sentence_ranges};
pub use reassemble::{Fragments, reassemble};
pub use tags::{TagOccurrence, extract_tags};

/// Splits a serialized block element into per-sentence fragments.
///
/// Input that lacks a wrapper element (fewer than two tags) yields no
/// fragments.
pub fn split_html_to_sentences(block_html: &str) -> Fragments {
    let (text, mut tags) = extract_tags(block_html);
    if tags.len() < 2 {
        return Fragments::default();
    }
    tags.remove(0);
    tags.pop();

    let ranges = sentence_ranges(&text);
    reassemble(&text, &tags, &ranges)
}
