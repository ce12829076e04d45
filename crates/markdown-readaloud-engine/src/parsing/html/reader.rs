use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Attribute, Element, Node, is_void_element};
use crate::parsing::ParseError;

/// Name given to the synthetic root that holds a parsed fragment.
pub const FRAGMENT_ROOT: &str = "body";

/// Parses an HTML fragment into a tree rooted at a synthetic `<body>`.
///
/// The reader is lenient in the way browsers are: end tags that close nothing
/// are dropped, an end tag closes any elements left open inside it, void
/// elements never take children, and elements still open at the end of input
/// are closed implicitly. Markup that never terminates (an unclosed comment,
/// CDATA section, processing instruction or tag) swallows the rest of the
/// input, which is kept verbatim as a [`Node::Raw`].
pub fn parse_fragment(html: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    config.trim_text(false);

    let mut tree = TreeBuilder::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(quick_xml::Error::IllFormed(err)) => {
                // The reader has already moved past the offending markup.
                log::warn!("Ignoring ill-formed markup: {err}");
                continue;
            }
            Err(quick_xml::Error::Syntax(err)) => {
                let at = reader.error_position() as usize;
                log::warn!("{err} at byte {at}, keeping the rest of the input as is");
                let rest = html.get(at..).unwrap_or_default();
                tree.append(Node::Raw(rest.to_string()));
                break;
            }
            Err(err) => return Err(err.into()),
        };

        match event {
            Event::Start(e) => {
                let el = element_from_start(&e);
                if is_void_element(&el.name) {
                    tree.append(Node::Element(el));
                } else {
                    tree.open.push(el);
                }
            }
            Event::Empty(e) => tree.append(Node::Element(element_from_start(&e))),
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                tree.close(&name);
            }
            Event::Text(e) => tree.push_text(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) => {
                // Entities stay encoded; decoding happens only for speech text.
                let entity = String::from_utf8_lossy(e.as_ref());
                tree.push_text(&format!("&{entity};"));
            }
            Event::CData(e) => {
                let data = String::from_utf8_lossy(e.as_ref());
                tree.append(Node::Raw(format!("<![CDATA[{data}]]>")));
            }
            Event::Comment(e) => {
                tree.append(Node::Comment(
                    String::from_utf8_lossy(e.as_ref()).into_owned(),
                ));
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    Ok(tree.finish())
}

fn element_from_start(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let attrs = start
        .html_attributes()
        .flatten()
        .map(|attr| Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase(),
            value: String::from_utf8_lossy(&attr.value).into_owned(),
        })
        .collect();

    Element {
        name,
        attrs,
        children: Vec::new(),
    }
}

/// The fragment root plus the elements opened inside it and not yet closed.
struct TreeBuilder {
    root: Element,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: Element::new(FRAGMENT_ROOT),
            open: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Element {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn append(&mut self, node: Node) {
        self.current().children.push(node);
    }

    /// Appends character data, merging with a preceding text node.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let parent = self.current();
        if let Some(Node::Text(existing)) = parent.children.last_mut() {
            existing.push_str(text);
        } else {
            parent.children.push(Node::Text(text.to_string()));
        }
    }

    /// Closes the innermost open `name` and everything opened inside it. The
    /// fragment root is not in `open`, so markup can never close it.
    fn close(&mut self, name: &str) {
        let Some(open_at) = self.open.iter().rposition(|el| el.name == name) else {
            return;
        };
        while self.open.len() > open_at {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(el) = self.open.pop() {
            self.append(Node::Element(el));
        }
    }

    fn finish(mut self) -> Element {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.root
    }
}
