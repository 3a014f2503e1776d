//! Group each question with its answer into a card container.

use serde_json::Value;

use super::classify::{is_question_heading, is_section_boundary, question_sections};
use super::node::{Element, Node, document_from_value, document_to_value};

/// Wrap every h3 and the nodes up to the next section boundary in a card.
///
/// Works on top-level nodes only. Everything outside a question passes
/// through unchanged and in order; boundary nodes are never swallowed.
pub fn wrap_faq_questions_into_cards(nodes: Vec<Node>, class: &str) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        if !is_question_heading(&node) {
            out.push(node);
            continue;
        }

        let mut group = vec![node];
        while let Some(next) = iter.next_if(|n| !is_section_boundary(n)) {
            group.push(next);
        }

        out.push(Node::Element(
            Element::new("div")
                .with_attr("class", class)
                .with_children(group),
        ));
    }

    out
}

/// JSON entry point. A value that is not an array is returned unchanged.
pub fn wrap_cards_value(value: Value, class: &str) -> Value {
    match document_from_value(&value) {
        Some(nodes) => document_to_value(wrap_faq_questions_into_cards(nodes, class)),
        None => value,
    }
}

/// Card count `nodes` would produce, without building them.
pub fn card_count(nodes: &[Node]) -> usize {
    question_sections(nodes).count()
}
