//! Node classification for grouping decisions.

use super::node::Node;

/// Tags that end the answer belonging to a preceding question heading.
pub const SECTION_BOUNDARIES: &[&str] = &["h1", "h2", "h3", "hr"];

/// Tag of a question heading.
pub const QUESTION_TAG: &str = "h3";

/// Check whether a node starts a new section.
#[inline]
pub fn is_section_boundary(node: &Node) -> bool {
    node.tag_name()
        .is_some_and(|tag| SECTION_BOUNDARIES.contains(&tag))
}

/// Check whether a node is a question heading.
#[inline]
pub fn is_question_heading(node: &Node) -> bool {
    node.tag_name() == Some(QUESTION_TAG)
}

/// Split `nodes[start..]` at the next section boundary.
///
/// Returns the index of the boundary (or `nodes.len()`).
pub fn section_end(nodes: &[Node], start: usize) -> usize {
    nodes[start..]
        .iter()
        .position(is_section_boundary)
        .map_or(nodes.len(), |offset| start + offset)
}

/// Question headings paired with the answer nodes that follow them.
///
/// Only top-level h3 nodes start a section. Content before the first h3 and
/// content after a non-question boundary (h1, h2, hr) belongs to no question.
pub fn question_sections(nodes: &[Node]) -> impl Iterator<Item = (&Node, &[Node])> {
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < nodes.len() {
            let start = i;
            if !is_question_heading(&nodes[start]) {
                i += 1;
                continue;
            }
            let end = section_end(nodes, start + 1);
            i = end;
            return Some((&nodes[start], &nodes[start + 1..end]));
        }
        None
    })
}
