//! # Sentence Tagging Pipeline
//!
//! Turns Markdown into HTML whose prose is split into addressable sentence
//! spans, plus a map from span id to the plain text of that span.
//!
//! ## Data flow
//!
//! ```text
//! Markdown → HTML (pulldown-cmark) → tree (html) → normalize_lists
//!          → assign_structural_ids → tag_sentences → pp→p → HTML + SentenceMap
//! ```
//!
//! Sentence ids are `{block id}-sentNNN`, block ids are `element-NNN`, both
//! zero-padded so that sorting the keys of a [`SentenceMap`] reproduces the
//! order in which the sentences appear in the document.

pub mod html;
pub mod segment;
pub mod structure;
pub mod tagger;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use pulldown_cmark::{Options, Parser};
use serde::Serialize;
use thiserror::Error;

use html::{inner_html, parse_fragment};
use structure::{PSEUDO_PARAGRAPH, assign_structural_ids, normalize_lists};
use tagger::BlockTagger;

/// Sentence span id → plain sentence text, in document order.
pub type SentenceMap = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed HTML: {0}")]
    Html(#[from] quick_xml::Error),
}

/// Output of the pipeline: the tagged HTML for rendering and the text of each
/// sentence for narration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub html: String,
    pub sentences: SentenceMap,
}

impl ParsedDocument {
    /// Sentence ids in narration order.
    pub fn sentence_ids(&self) -> impl Iterator<Item = &str> {
        self.sentences.keys().map(String::as_str)
    }
}

/// Converts Markdown to HTML with GitHub-flavoured extensions.
pub fn markdown_to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}

/// Runs the full pipeline over a Markdown document.
pub fn parse_markdown(markdown: &str) -> Result<ParsedDocument, ParseError> {
    tag_html(&markdown_to_html(markdown))
}

/// Runs the pipeline over already-rendered HTML.
pub fn tag_html(html: &str) -> Result<ParsedDocument, ParseError> {
    let mut root = parse_fragment(html)?;

    normalize_lists(&mut root);
    let elements = assign_structural_ids(&mut root);
    let sentences = tag_sentences(&mut root);
    root.rename_descendants(PSEUDO_PARAGRAPH, "p");

    log::debug!(
        "tagged {} sentences across {} elements",
        sentences.len(),
        elements
    );

    Ok(ParsedDocument {
        html: inner_html(&root),
        sentences,
    })
}

/// Tags every paragraph, heading and pseudo-paragraph under `root`.
pub fn tag_sentences(root: &mut html::Element) -> SentenceMap {
    BlockTagger::new().tag(root)
}
