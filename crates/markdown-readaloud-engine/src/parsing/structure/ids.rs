use super::pad_width;
use crate::parsing::html::Element;

pub const ID_PREFIX: &str = "element";

/// Gives every element under and including `root` a positional id
/// (`element-001`, `element-002`, ...) in pre-order.
///
/// Existing ids are overwritten, so running the pass again on an unchanged
/// tree reproduces the same ids. Returns the number of elements numbered.
pub fn assign_structural_ids(root: &mut Element) -> usize {
    let width = pad_width(count_elements(root));
    let mut counter = 0;
    assign(root, &mut counter, width);
    counter
}

fn count_elements(el: &Element) -> usize {
    1 + el.child_elements().map(count_elements).sum::<usize>()
}

fn assign(el: &mut Element, counter: &mut usize, width: usize) {
    *counter += 1;
    el.set_attr("id", format!("{ID_PREFIX}-{:0width$}", *counter));
    for child in el.child_elements_mut() {
        assign(child, counter, width);
    }
}
