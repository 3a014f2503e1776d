//! Markdown input support.
//!
//! - [`convert`] - Markdown → AST document conversion via `pulldown-cmark`
//! - [`meta`] - YAML-like / TOML frontmatter

pub mod convert;
mod meta;

use anyhow::Result;

use crate::faq::Node;

pub use convert::{MarkdownOptions, from_markdown};
pub use meta::{FaqMeta, MarkdownMetaExtractor};

/// Split frontmatter from `source` and convert the body.
pub fn parse_markdown(source: &str) -> Result<(Option<FaqMeta>, Vec<Node>)> {
    let (meta, body) = match MarkdownMetaExtractor.extract_frontmatter(source)? {
        Some((meta, body)) => (Some(meta), body),
        None => (None, source),
    };

    Ok((meta, from_markdown(body, &MarkdownOptions::all())))
}
