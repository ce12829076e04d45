use super::{boundaries::SentenceRange, tags::TagOccurrence};

/// Parallel per-sentence fragments of one block.
///
/// `html[i]` and `text[i]` describe the same sentence; the last entry may be
/// trailing text that no boundary closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub html: Vec<String>,
    pub text: Vec<String>,
}

impl Fragments {
    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.html
            .iter()
            .zip(&self.text)
            .map(|(html, text)| (html.as_str(), text.as_str()))
    }

    fn push(&mut self, html: &mut String, text: &mut String) {
        self.html.push(std::mem::take(html));
        self.text.push(std::mem::take(text));
    }
}

/// Rebuilds per-sentence HTML by walking the stripped text and splicing tags
/// back in at their recorded offsets.
///
/// A fragment is closed when the walk reaches the end of the current sentence
/// range. Tags at that offset are split around the cut: closing tags finish
/// the sentence they close, the remaining tags open the next fragment. Tags are
/// never reordered, so concatenating `html` gives back the interior markup.
pub fn reassemble(text: &str, tags: &[TagOccurrence], ranges: &[SentenceRange]) -> Fragments {
    let mut fragments = Fragments::default();
    let mut html = String::new();
    let mut plain = String::new();
    let mut next_tag = 0;
    let mut next_range = 0;

    for (i, ch) in text.char_indices() {
        let at_boundary = ranges.get(next_range).is_some_and(|r| i >= r.end);

        while let Some(tag) = tags.get(next_tag).filter(|t| t.position <= i) {
            if at_boundary && !tag.is_closing() {
                break;
            }
            html.push_str(&tag.tag);
            next_tag += 1;
        }

        if at_boundary {
            fragments.push(&mut html, &mut plain);
            next_range += 1;
        }

        while let Some(tag) = tags.get(next_tag).filter(|t| t.position <= i) {
            html.push_str(&tag.tag);
            next_tag += 1;
        }

        html.push(ch);
        plain.push(ch);
    }

    // Tags after the last character (typically closing inline markup).
    for tag in &tags[next_tag..] {
        html.push_str(&tag.tag);
    }
    if !html.is_empty() {
        fragments.push(&mut html, &mut plain);
    }

    fragments
}
