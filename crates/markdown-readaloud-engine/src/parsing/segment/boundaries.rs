use unicode_segmentation::UnicodeSegmentation;

/// Byte range of one sentence within a block's stripped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceRange {
    pub start: usize,
    pub end: usize,
}

/// Finds sentence ranges using Unicode (UAX #29) sentence boundaries.
///
/// Ranges are ordered, non-overlapping and exclude surrounding whitespace;
/// whitespace-only segments produce no range. Line breaks inside a block come
/// from source wrapping rather than paragraph structure, so they are read as
/// spaces when looking for boundaries.
pub fn sentence_ranges(text: &str) -> Vec<SentenceRange> {
    // '\n' and '\r' are single bytes, as is ' ', so offsets are unchanged.
    let unwrapped = text.replace(['\n', '\r'], " ");

    unwrapped
        .split_sentence_bound_indices()
        .filter_map(|(offset, segment)| {
            let body = segment.trim();
            if body.is_empty() {
                return None;
            }
            let start = offset + (segment.len() - segment.trim_start().len());
            Some(SentenceRange {
                start,
                end: start + body.len(),
            })
        })
        .collect()
}
