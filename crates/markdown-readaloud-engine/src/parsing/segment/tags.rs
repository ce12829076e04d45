use std::sync::OnceLock;

use regex::Regex;

/// A tag removed from block HTML, positioned in the tag-stripped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// Byte offset into the stripped text. The tag sits before the character
    /// at this offset.
    pub position: usize,
    pub tag: String,
}

impl TagOccurrence {
    pub fn is_closing(&self) -> bool {
        self.tag.starts_with("</")
    }
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"))
}

/// Strips every tag from `html`, recording where each one stood.
///
/// Offsets are cumulative: each tag's position accounts for all tags removed
/// before it, so it indexes the returned text directly. Input without tags is
/// returned unchanged with no occurrences.
pub fn extract_tags(html: &str) -> (String, Vec<TagOccurrence>) {
    let mut text = String::with_capacity(html.len());
    let mut tags = Vec::new();
    let mut last = 0;

    for m in tag_regex().find_iter(html) {
        text.push_str(&html[last..m.start()]);
        tags.push(TagOccurrence {
            position: text.len(),
            tag: m.as_str().to_string(),
        });
        last = m.end();
    }
    text.push_str(&html[last..]);

    (text, tags)
}
