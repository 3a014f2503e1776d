//! Plain-text flattening of AST nodes.

use super::node::Node;

/// Deeper subtrees contribute nothing to the extracted text.
pub(super) const MAX_DEPTH: usize = 256;

/// Flatten a node into plain text.
///
/// Text leaves are returned as-is, elements concatenate the text of their
/// children with no separator, and non-conforming values yield `""`.
pub fn extract_text(node: &Node) -> String {
    let mut out = String::new();
    push_text(node, 0, &mut out);
    out
}

fn push_text(node: &Node, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(elem) => {
            for child in &elem.children {
                push_text(child, depth + 1, out);
            }
        }
        Node::Other(_) => {}
    }
}
