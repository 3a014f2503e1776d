//! "New item" tags embedded in answer content.
//!
//! Authors mark a freshly added answer with either form:
//!
//! ```text
//! {new:2026-10-12}
//! <!-- new:2026-10-12 -->
//! ```
//!
//! The curly form is what gets written in markdown; the comment form is what
//! survives when the markdown layer passes raw HTML through. Both are honored
//! everywhere.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::node::Node;
use super::text::extract_text;

/// Days a tagged answer stays "new", today inclusive.
pub const NEW_WINDOW_DAYS: i64 = 10;

/// Date format used inside tags.
pub const TAG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Both tag forms. Group 1 is the curly date, group 2 the comment date.
static NEW_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{new:([0-9]{4}-[0-9]{2}-[0-9]{2})\}|<!--\s*new:\s*([0-9]{4}-[0-9]{2}-[0-9]{2})\s*-->")
        .unwrap()
});

/// Anything that looks like a tag, valid date or not.
static TAG_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{new:([^}]*)\}|<!--\s*new:(.*?)-->").unwrap());

/// Parse a `YYYY-MM-DD` tag date into a calendar date.
pub fn parse_tag_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), TAG_DATE_FORMAT).ok()
}

/// Whole days from `date` to `today` (positive when `date` is in the past).
pub fn days_since(date: &str, today: NaiveDate) -> Option<i64> {
    parse_tag_date(date).map(|d| (today - d).num_days())
}

/// Check whether a tag date is inside the freshness window.
///
/// True iff `0 <= today - date <= window_days`. Future dates and dates that
/// fail to parse are never within the window.
pub fn is_within_new_window(date: &str, today: NaiveDate, window_days: i64) -> bool {
    days_since(date, today).is_some_and(|diff| (0..=window_days).contains(&diff))
}

/// Dates of every well-formed tag in `text`, in the order stripping removes
/// them. Tags uncovered by removing an inner tag come after the first pass.
pub fn tag_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    let mut current = Cow::Borrowed(text);
    while has_new_tag(&current) {
        dates.extend(
            NEW_TAG
                .captures_iter(&current)
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
                .map(|m| m.as_str().to_string()),
        );
        current = Cow::Owned(strip_pass(&current));
    }
    dates
}

/// Check whether `text` contains any well-formed tag.
#[inline]
pub fn has_new_tag(text: &str) -> bool {
    NEW_TAG.is_match(text)
}

/// Byte range of the first well-formed tag in `text`.
pub fn find_new_tag(text: &str) -> Option<Range<usize>> {
    NEW_TAG.find(text).map(|m| m.range())
}

/// Remove every well-formed tag from `text`.
///
/// Runs until no tag is left, so `{new:{new:D}D}` disappears completely. A tag
/// between two spaces takes one of them along, and so does a tag at either
/// end of a line.
pub fn strip_new_tags(text: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);
    while has_new_tag(&current) {
        current = Cow::Owned(strip_pass(&current));
    }
    current
}

fn strip_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = 0;
    for m in NEW_TAG.find_iter(text) {
        out.push_str(&text[rest..m.start()]);
        rest = m.end();

        let after = &text[rest..];
        let line_start = out.is_empty() || out.ends_with([' ', '\n']);
        if after.starts_with(' ') && line_start {
            rest += 1;
        } else if out.ends_with(' ') && (after.is_empty() || after.starts_with('\n')) {
            out.pop();
        }
    }
    out.push_str(&text[rest..]);
    out
}

/// Tag-like tokens in `text` that are not honored as tags.
///
/// Covers bad dates (`{new:2026-13-01}`), wrong shapes (`{new: 2026-10-01}`)
/// and anything else that reads like a tag but will never be dated.
pub fn malformed_tags(text: &str) -> Vec<&str> {
    TAG_LIKE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|raw| !is_valid_tag(raw))
        .collect()
}

/// Whole-token check: well-formed and a real calendar date.
fn is_valid_tag(raw: &str) -> bool {
    NEW_TAG.captures(raw).is_some_and(|caps| {
        let whole = caps.get(0).is_some_and(|m| m.len() == raw.len());
        let date = caps.get(1).or_else(|| caps.get(2));
        whole && date.is_some_and(|d| parse_tag_date(d.as_str()).is_some())
    })
}

/// First tagged date in `nodes`, regardless of the freshness window.
///
/// Scans the flattened text of each node in order. Tags whose date is not a
/// real calendar day (e.g. `2026-02-30`) are skipped.
pub fn extract_tagged_date(nodes: &[Node]) -> Option<String> {
    nodes.iter().find_map(|node| {
        tag_dates(&extract_text(node))
            .into_iter()
            .find(|date| parse_tag_date(date).is_some())
    })
}

/// The tagged date of `nodes`, only if it is within the freshness window.
///
/// The first tag decides: a stale first tag is not overridden by a later one.
pub fn extract_new_date(nodes: &[Node], today: NaiveDate, window_days: i64) -> Option<String> {
    extract_tagged_date(nodes).filter(|date| is_within_new_window(date, today, window_days))
}
