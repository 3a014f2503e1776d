//! Question/answer extraction for accordion rendering.

use serde::Serialize;
use serde_json::Value;

use super::FaqContext;
use super::classify::question_sections;
use super::filter::filter_new_comments;
use super::node::{Node, document_from_value};
use super::tag::{NEW_WINDOW_DAYS, extract_new_date, extract_tagged_date};
use super::text::extract_text;
use crate::debug;

/// One accordion entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqRecord {
    /// Plain question text from the h3.
    pub question: String,
    /// Answer nodes with tags stripped and placeholders filled in.
    pub answer: Vec<Node>,
    /// Tagged and still inside the freshness window.
    pub is_new: bool,
    /// Tag date whenever a tag was found, fresh or not.
    pub new_date: Option<String>,
}

/// Turn top-level h3 sections into FAQ records, in document order.
///
/// The answer of a question is every node after its h3 up to the next
/// `h1`/`h2`/`h3`/`hr`. Headings with blank text are skipped together with
/// their answer.
pub fn transform_faqs_to_accordion_data(nodes: &[Node], ctx: &FaqContext) -> Vec<FaqRecord> {
    let today = ctx.today();

    question_sections(nodes)
        .filter_map(|(heading, candidate)| {
            let question = extract_text(heading).trim().to_string();
            if question.is_empty() {
                debug!("faq"; "skipping h3 without text ({} answer nodes)", candidate.len());
                return None;
            }

            let new_date = extract_tagged_date(candidate);
            let is_new = extract_new_date(candidate, today, NEW_WINDOW_DAYS).is_some();

            Some(FaqRecord {
                question,
                answer: filter_new_comments(candidate, ctx),
                is_new,
                new_date,
            })
        })
        .collect()
}

/// JSON entry point. Anything that is not an array yields no records.
pub fn transform_value(value: &Value, ctx: &FaqContext) -> Vec<FaqRecord> {
    document_from_value(value)
        .map(|nodes| transform_faqs_to_accordion_data(&nodes, ctx))
        .unwrap_or_default()
}
