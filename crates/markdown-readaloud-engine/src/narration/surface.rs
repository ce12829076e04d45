use crate::parsing::{
    ParseError,
    html::{Element, inner_html, parse_fragment},
};

/// Class added to the sentence currently being read.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// The rendered document as the narrator sees it: elements addressed by id.
pub trait Surface {
    fn contains(&self, id: &str) -> bool;
    fn highlight(&mut self, id: &str);
    fn unhighlight(&mut self, id: &str);
    fn scroll_into_view(&mut self, id: &str);
}

/// A [`Surface`] over tagged HTML held in memory.
///
/// Highlighting toggles the `highlight` class on the element; scrolling is
/// recorded so callers can follow the reading position.
#[derive(Debug, Clone)]
pub struct TreeSurface {
    root: Element,
    scrolled: Vec<String>,
}

impl TreeSurface {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            scrolled: Vec::new(),
        }
    }

    pub fn from_html(html: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_fragment(html)?))
    }

    pub fn html(&self) -> String {
        inner_html(&self.root)
    }

    /// Ids of all currently highlighted elements, in document order.
    pub fn highlighted(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_highlighted(&self.root, &mut out);
        out
    }

    /// Every id scrolled to, oldest first.
    pub fn scrolled(&self) -> &[String] {
        &self.scrolled
    }
}

fn collect_highlighted(el: &Element, out: &mut Vec<String>) {
    if el.has_class(HIGHLIGHT_CLASS)
        && let Some(id) = el.id()
    {
        out.push(id.to_string());
    }
    for child in el.child_elements() {
        collect_highlighted(child, out);
    }
}

impl Surface for TreeSurface {
    fn contains(&self, id: &str) -> bool {
        self.root.find_by_id(id).is_some()
    }

    fn highlight(&mut self, id: &str) {
        if let Some(el) = self.root.find_by_id_mut(id) {
            el.add_class(HIGHLIGHT_CLASS);
        }
    }

    fn unhighlight(&mut self, id: &str) {
        if let Some(el) = self.root.find_by_id_mut(id) {
            el.remove_class(HIGHLIGHT_CLASS);
        }
    }

    fn scroll_into_view(&mut self, id: &str) {
        if self.contains(id) {
            self.scrolled.push(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TAGGED: &str = r#"<p id="element-002"><span class="sent" id="element-002-sent000">One.</span><span class="sent" id="element-002-sent001"> Two.</span></p>"#;

    #[test]
    fn highlight_toggles_the_class() {
        let mut surface = TreeSurface::from_html(TAGGED).unwrap();

        surface.highlight("element-002-sent001");
        assert!(
            surface
                .html()
                .contains(r#"<span class="sent highlight" id="element-002-sent001">"#)
        );
        assert_eq!(surface.highlighted(), vec!["element-002-sent001"]);

        surface.unhighlight("element-002-sent001");
        assert_eq!(surface.html(), TAGGED);
        assert!(surface.highlighted().is_empty());
    }

    #[test]
    fn missing_ids_are_ignored() {
        let mut surface = TreeSurface::from_html(TAGGED).unwrap();

        assert!(!surface.contains("element-009-sent000"));
        surface.highlight("element-009-sent000");
        surface.scroll_into_view("element-009-sent000");

        assert_eq!(surface.html(), TAGGED);
        assert!(surface.scrolled().is_empty());
    }

    #[test]
    fn scrolling_is_recorded_in_order() {
        let mut surface = TreeSurface::from_html(TAGGED).unwrap();

        surface.scroll_into_view("element-002-sent000");
        surface.scroll_into_view("element-002-sent001");

        assert_eq!(
            surface.scrolled(),
            ["element-002-sent000", "element-002-sent001"]
        );
    }
}
