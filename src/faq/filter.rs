//! Answer clean-up: strip "new" tags and fill in the deadline countdown.

use std::ops::Range;

use super::FaqContext;
use super::deadline::{DEADLINE_PLACEHOLDER, substitute_placeholder};
use super::node::{Element, Node};
use super::tag::{find_new_tag, has_new_tag, strip_new_tags};
use super::text::{MAX_DEPTH, extract_text};

/// Strip tags and substitute placeholders in every text leaf of `nodes`.
///
/// A tag spread over several inline children (`{new:` + `<em>date</em>` +
/// `}`) is removed from its enclosing element as well. Text left blank by tag
/// removal is dropped, and so is any element whose children all disappeared
/// that way, so a paragraph holding only a tag never renders as an empty
/// `<p>`. Content that was already empty is kept.
///
/// Applying this twice gives the same result as applying it once.
pub fn filter_new_comments(nodes: &[Node], ctx: &FaqContext) -> Vec<Node> {
    let filter = Filter {
        days: ctx.days_until_deadline(),
    };
    filter.nodes(nodes)
}

struct Filter {
    days: i64,
}

impl Filter {
    fn nodes(&self, nodes: &[Node]) -> Vec<Node> {
        nodes.iter().filter_map(|node| self.node(node)).collect()
    }

    /// Filter one node; `None` means it was emptied by tag removal.
    fn node(&self, node: &Node) -> Option<Node> {
        match node {
            Node::Text(text) => self.text(text).map(Node::Text),
            Node::Element(elem) => self.element(elem).map(Node::Element),
            Node::Other(_) => Some(node.clone()),
        }
    }

    fn text(&self, text: &str) -> Option<String> {
        let tagged = has_new_tag(text);
        let stripped = if tagged {
            strip_new_tags(text).into_owned()
        } else {
            text.to_string()
        };

        if tagged && stripped.trim().is_empty() {
            return None;
        }

        Some(substitute_placeholder(&stripped, DEADLINE_PLACEHOLDER, self.days).unwrap_or(stripped))
    }

    fn element(&self, elem: &Element) -> Option<Element> {
        let mut children = self.nodes(&elem.children);

        // Leaves are clean now; what is left spans several children.
        let mut flat = flatten(&children);
        while let Some(range) = find_new_tag(&flat) {
            cut(&mut children, &range, &mut 0, 0);
            flat = flatten(&children);
        }

        // Only elements that lost everything to tag removal disappear.
        if children.is_empty() && !elem.children.is_empty() {
            return None;
        }

        Some(Element {
            tag: elem.tag.clone(),
            attrs: elem.attrs.clone(),
            children,
        })
    }
}

fn flatten(nodes: &[Node]) -> String {
    nodes.iter().map(extract_text).collect()
}

/// Remove the bytes `range` of the flattened text of `nodes`.
///
/// `offset` is where `nodes` start in that text. Leaves left blank and
/// elements left without children are dropped.
fn cut(nodes: &mut Vec<Node>, range: &Range<usize>, offset: &mut usize, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    nodes.retain_mut(|node| match node {
        Node::Text(text) => {
            let start = *offset;
            let end = start + text.len();
            *offset = end;
            if end <= range.start || start >= range.end {
                return true;
            }
            let from = range.start.saturating_sub(start);
            let to = range.end.min(end) - start;
            text.replace_range(from..to, "");
            !text.trim().is_empty()
        }
        Node::Element(elem) => {
            let had_children = !elem.children.is_empty();
            cut(&mut elem.children, range, offset, depth + 1);
            !had_children || !elem.children.is_empty()
        }
        Node::Other(_) => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::deadline::compliance_deadline;
    use chrono::{Days, NaiveDate};
    use serde_json::json;

    fn ctx_days_before_deadline(n: u64) -> FaqContext {
        FaqContext::on(compliance_deadline() - Days::new(n))
    }

    fn nodes(value: serde_json::Value) -> Vec<Node> {
        crate::faq::node::document_from_value(&value).unwrap()
    }

    #[test]
    fn test_tag_only_paragraph_dropped() {
        let ctx = ctx_days_before_deadline(5);
        let input = nodes(json!([["p", {}, "{new:2026-04-18}"], ["p", {}, "Body"]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["p", {}, "Body"]])));
    }

    #[test]
    fn test_comment_tag_with_whitespace_dropped() {
        let ctx = ctx_days_before_deadline(5);
        let input = nodes(json!(["<!-- new:2026-04-18 -->\n", ["p", {}, "Body"]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["p", {}, "Body"]])));
    }

    #[test]
    fn test_inline_tag_removed_text_kept() {
        let ctx = ctx_days_before_deadline(5);
        let input = nodes(json!([["p", {}, "{new:2026-04-18}Updated guidance."]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["p", {}, "Updated guidance."]])));
    }

    #[test]
    fn test_nested_wrapper_dropped_when_emptied() {
        let ctx = ctx_days_before_deadline(5);
        let input = nodes(json!([["div", {}, ["p", {}, ["em", {}, "{new:2026-04-18}"]]], ["hr", {}]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["hr", {}]])));
    }

    #[test]
    fn test_preexisting_empty_nodes_kept() {
        let ctx = ctx_days_before_deadline(5);
        let input = nodes(json!([["br", {}], ["p", {}, ""], " "]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, input);
    }

    #[test]
    fn test_placeholder_substitution() {
        for n in [0u64, 7, 120] {
            let ctx = ctx_days_before_deadline(n);
            let input = nodes(json!([["p", {}, "Only ", ["strong", {}, "{days_until_deadline} days"], " left."]]));
            let out = filter_new_comments(&input, &ctx);
            let text = out.iter().map(extract_text).collect::<String>();
            assert_eq!(text, format!("Only {n} days left."));
        }
    }

    #[test]
    fn test_placeholder_after_deadline_is_zero() {
        let ctx = FaqContext::on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        let input = vec![Node::text("{days_until_deadline}")];
        assert_eq!(filter_new_comments(&input, &ctx), vec![Node::text("0")]);
    }

    #[test]
    fn test_idempotent() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([
            ["p", {}, "{new:2026-04-20}"],
            ["p", {}, "Text <!-- new:2026-04-20 --> more {days_until_deadline}"],
            ["ul", {}, ["li", {}, "{new:2026-04-19}"], ["li", {}, "kept"]],
            ["p", {}, "{new:2026-02-30} invalid date, still stripped"],
            null
        ]));
        let once = filter_new_comments(&input, &ctx);
        let twice = filter_new_comments(&once, &ctx);
        assert_eq!(once, twice);
        assert!(!once.iter().map(extract_text).collect::<String>().contains("{new:2026-04"));
    }

    #[test]
    fn test_nested_tag_removed_in_one_pass() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([["p", {}, "{new:{new:2026-04-18}2026-04-18}"], ["p", {}, "Body"]]));
        let once = filter_new_comments(&input, &ctx);
        assert_eq!(once, nodes(json!([["p", {}, "Body"]])));
        assert_eq!(filter_new_comments(&once, &ctx), once);
    }

    #[test]
    fn test_tag_split_across_inline_children() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([["p", {}, "{new:", ["em", {}, "2026-04-18"], "}"], ["p", {}, "Body"]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["p", {}, "Body"]])));
    }

    #[test]
    fn test_split_tag_keeps_surrounding_text() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([["p", {}, "Updated {new:", ["strong", {}, "2026-04-18"], "} today ", ["em", {}, "again"]]]));
        let once = filter_new_comments(&input, &ctx);
        assert_eq!(once, nodes(json!([["p", {}, "Updated ", " today ", ["em", {}, "again"]]])));
        assert_eq!(filter_new_comments(&once, &ctx), once);
    }

    #[test]
    fn test_inline_tag_leaves_single_space() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([["p", {}, "See <!-- new:2026-04-18 --> the guide."], ["p", {}, "{new:2026-04-18} Answer"]]));
        let out = filter_new_comments(&input, &ctx);
        assert_eq!(out, nodes(json!([["p", {}, "See the guide."], ["p", {}, "Answer"]])));
    }

    #[test]
    fn test_attributes_untouched() {
        let ctx = ctx_days_before_deadline(3);
        let input = nodes(json!([["a", {"href": "/{days_until_deadline}"}, "link"]]));
        assert_eq!(filter_new_comments(&input, &ctx), input);
    }
}
