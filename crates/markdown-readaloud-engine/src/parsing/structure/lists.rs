use crate::parsing::html::{Element, Node};

/// Marker element wrapping inline list-item content until tagging is done.
pub const PSEUDO_PARAGRAPH: &str = "pp";

const LIST_ELEMENTS: [&str; 2] = ["ul", "ol"];

/// Children of a list item that are already block structure and must not be
/// folded into a pseudo-paragraph.
const BLOCK_ELEMENTS: [&str; 15] = [
    "p",
    "div",
    "pre",
    "blockquote",
    "table",
    "hr",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "dl",
    "figure",
    PSEUDO_PARAGRAPH,
];

fn is_list(name: &str) -> bool {
    LIST_ELEMENTS.contains(&name)
}

fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

/// Wraps inline runs inside every `<li>` under `root` in pseudo-paragraphs,
/// so list text is tagged like ordinary paragraphs.
///
/// Nested lists split the runs around them and are normalized before the
/// item that contains them. Each list item is visited exactly once.
pub fn normalize_lists(root: &mut Element) {
    for child in root.child_elements_mut() {
        if child.name == "li" {
            normalize_item(child);
        } else {
            normalize_lists(child);
        }
    }
}

fn normalize_item(item: &mut Element) {
    if has_single_paragraph(item) {
        return;
    }

    let contents = std::mem::take(&mut item.children);
    let mut rebuilt = Vec::with_capacity(contents.len());
    let mut buffer = Vec::new();

    for node in contents {
        match node {
            Node::Element(mut el) if is_list(&el.name) || is_block(&el.name) => {
                flush(&mut buffer, &mut rebuilt);
                normalize_lists(&mut el);
                rebuilt.push(Node::Element(el));
            }
            other => buffer.push(other),
        }
    }
    flush(&mut buffer, &mut rebuilt);

    item.children = rebuilt;
}

/// A loose list item: one `<p>` and nothing else but whitespace.
fn has_single_paragraph(item: &Element) -> bool {
    let mut elements = item.child_elements();
    let single_p = matches!(
        (elements.next(), elements.next()),
        (Some(only), None) if only.name == "p"
    );
    single_p
        && item
            .children
            .iter()
            .all(|node| node.as_element().is_some() || node.is_blank_text())
}

fn flush(buffer: &mut Vec<Node>, out: &mut Vec<Node>) {
    if buffer.is_empty() {
        return;
    }
    let nodes = std::mem::take(buffer);
    if nodes.iter().all(Node::is_blank_text) {
        // Formatting whitespace between block children; nothing to narrate.
        out.extend(nodes);
        return;
    }
    out.push(Node::Element(Element::with_children(PSEUDO_PARAGRAPH, nodes)));
}
