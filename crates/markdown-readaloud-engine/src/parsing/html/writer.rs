use super::{Element, Node, is_void_element};

/// Serializes an element including its own tags.
pub fn outer_html(el: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, el);
    out
}

/// Serializes an element's children only.
pub fn inner_html(el: &Element) -> String {
    let mut out = String::new();
    for child in &el.children {
        write_node(&mut out, child);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(text) | Node::Raw(text) => out.push_str(text),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    for attr in &el.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        // Values are kept entity-encoded, so only the delimiter needs escaping.
        out.push_str(&attr.value.replace('"', "&quot;"));
        out.push('"');
    }

    if is_void_element(&el.name) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::html::Attribute;

    fn paragraph(children: Vec<Node>) -> Element {
        Element {
            name: "p".into(),
            attrs: vec![Attribute {
                name: "id".into(),
                value: "element-002".into(),
            }],
            children,
        }
    }

    #[test]
    fn writes_attributes_in_order() {
        let mut el = paragraph(vec![Node::Text("hi".into())]);
        el.set_attr("class", "sent");
        assert_eq!(outer_html(&el), r#"<p id="element-002" class="sent">hi</p>"#);
    }

    #[test]
    fn raw_nodes_are_written_verbatim() {
        let el = paragraph(vec![Node::Raw("<em>half open".into())]);
        assert_eq!(inner_html(&el), "<em>half open");
    }

    #[test]
    fn comments_keep_their_content() {
        let el = paragraph(vec![Node::Comment(" note ".into())]);
        assert_eq!(inner_html(&el), "<!-- note -->");
    }

    #[test]
    fn quotes_in_attribute_values_are_escaped() {
        let mut el = Element::new("a");
        el.set_attr("title", r#"say "hi""#);
        assert_eq!(outer_html(&el), r#"<a title="say &quot;hi&quot;"></a>"#);
    }

    #[test]
    fn void_elements_self_close() {
        let el = Element::new("br");
        assert_eq!(outer_html(&el), "<br />");
    }
}
