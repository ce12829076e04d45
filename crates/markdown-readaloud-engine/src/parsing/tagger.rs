use super::{
    SentenceMap,
    html::{Attribute, Element, Node, outer_html},
    segment::split_html_to_sentences,
    structure::{PSEUDO_PARAGRAPH, pad_width},
};

/// Class carried by every sentence span.
pub const SENTENCE_CLASS: &str = "sent";

/// Prefix for ids minted for blocks that reach tagging without one.
pub const FALLBACK_BLOCK_PREFIX: &str = "block";

const TAGGABLE_BLOCKS: [&str; 8] = ["p", PSEUDO_PARAGRAPH, "h1", "h2", "h3", "h4", "h5", "h6"];

pub fn is_taggable(name: &str) -> bool {
    TAGGABLE_BLOCKS.contains(&name)
}

/// Wraps each sentence of every paragraph, heading and pseudo-paragraph in an
/// identified `<span class="sent">`, returning the text of each span keyed by
/// its id.
#[derive(Debug, Default)]
pub struct BlockTagger {
    sentences: SentenceMap,
    fallback_ids: usize,
}

impl BlockTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every block under `root` in document order.
    pub fn tag(mut self, root: &mut Element) -> SentenceMap {
        self.visit(root);
        self.sentences
    }

    fn visit(&mut self, el: &mut Element) {
        for child in el.child_elements_mut() {
            if is_taggable(&child.name) {
                self.tag_block(child);
            } else {
                self.visit(child);
            }
        }
    }

    fn tag_block(&mut self, block: &mut Element) {
        let block_id = match block.id() {
            Some(id) => id.to_string(),
            None => self.mint_fallback_id(&block.name),
        };

        let fragments = split_html_to_sentences(&outer_html(block));
        let width = pad_width(fragments.len());
        let mut children = Vec::with_capacity(fragments.len());

        for (index, (html, text)) in fragments.iter().enumerate() {
            if html.is_empty() {
                continue;
            }
            if text.trim().is_empty() {
                // Whitespace and markup only: keep it in place, unaddressed.
                children.push(Node::Raw(html.to_string()));
                continue;
            }

            let span_id = format!("{block_id}-sent{index:0width$}");
            children.push(Node::Element(sentence_span(&span_id, html)));
            self.sentences.insert(span_id, speech_text(text));
        }

        block.attrs = vec![Attribute {
            name: "id".to_string(),
            value: block_id,
        }];
        block.children = children;
    }

    fn mint_fallback_id(&mut self, name: &str) -> String {
        self.fallback_ids += 1;
        let id = format!("{FALLBACK_BLOCK_PREFIX}-{:03}", self.fallback_ids);
        log::warn!("<{name}> reached sentence tagging without an id, using {id}");
        id
    }
}

fn sentence_span(id: &str, html: &str) -> Element {
    Element {
        name: "span".to_string(),
        attrs: vec![
            Attribute {
                name: "class".to_string(),
                value: SENTENCE_CLASS.to_string(),
            },
            Attribute {
                name: "id".to_string(),
                value: id.to_string(),
            },
        ],
        children: vec![Node::Raw(html.to_string())],
    }
}

/// Plain text handed to the speech engine, with HTML entities decoded.
fn speech_text(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
