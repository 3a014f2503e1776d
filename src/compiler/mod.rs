//! Content loading: files on disk to AST documents.
//!
//! Markdown goes through [`markdown`]; `.json` files are read as nested-array
//! documents as produced by external markdown-to-AST parsers.

pub mod markdown;

use anyhow::{Context, Result};
use jwalk::WalkDir;
use serde_json::Value;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::core::ContentKind;
use crate::debug;
use crate::faq::node::{document_from_value, document_to_value, is_element_node};
use crate::faq::{
    FaqContext, FaqRecord, Node, transform_faqs_to_accordion_data, transform_value,
    wrap_cards_value, wrap_faq_questions_into_cards,
};
use markdown::{FaqMeta, parse_markdown};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect()
}

/// Collect content files (markdown and AST JSON), sorted for stable output.
pub fn collect_content_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = collect_all_files(dir)
        .into_iter()
        .filter(|p| ContentKind::is_content_file(p))
        .collect();
    files.sort();
    files
}

/// Document body as loaded.
#[derive(Debug, Clone)]
pub enum Body {
    /// Converted from markdown
    Nodes(Vec<Node>),
    /// Raw JSON; may not be a document at all
    Json(Value),
}

/// A loaded content file.
#[derive(Debug, Clone)]
pub struct Source {
    pub meta: Option<FaqMeta>,
    pub body: Body,
}

impl Source {
    /// Read and parse a content file.
    pub fn load(path: &Path) -> Result<Self> {
        let kind = ContentKind::from_path(path)
            .with_context(|| format!("Unsupported content file: {}", path.display()))?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(path, kind, &content)
    }

    /// Parse file content of a known kind.
    pub fn parse(path: &Path, kind: ContentKind, content: &str) -> Result<Self> {
        let (meta, body) = match kind {
            ContentKind::Markdown => {
                let (meta, nodes) = parse_markdown(content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                (meta, Body::Nodes(nodes))
            }
            ContentKind::Ast => {
                let value: Value = serde_json::from_str(content)
                    .with_context(|| format!("Invalid JSON in {}", path.display()))?;
                match &value {
                    Value::Array(items) => {
                        let stray = items
                            .iter()
                            .filter(|v| !v.is_string() && !is_element_node(v))
                            .count();
                        if stray > 0 {
                            debug!("load"; "{}: {} non-node items kept verbatim", path.display(), stray);
                        }
                    }
                    _ => debug!("load"; "{} is not an AST array, treating as empty", path.display()),
                }
                (None, Body::Json(value))
            }
        };

        Ok(Self { meta, body })
    }

    /// Whether frontmatter marks this file as a draft.
    pub fn is_draft(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.draft)
    }

    /// Top-level nodes; empty when the JSON is not a document.
    pub fn nodes(&self) -> Cow<'_, [Node]> {
        match &self.body {
            Body::Nodes(nodes) => Cow::Borrowed(nodes),
            Body::Json(value) => Cow::Owned(document_from_value(value).unwrap_or_default()),
        }
    }

    /// FAQ records for this document.
    pub fn records(&self, ctx: &FaqContext) -> Vec<FaqRecord> {
        match &self.body {
            Body::Nodes(nodes) => transform_faqs_to_accordion_data(nodes, ctx),
            Body::Json(value) => transform_value(value, ctx),
        }
    }

    /// Card-wrapped document. Non-document JSON passes through unchanged.
    pub fn into_cards(self, class: &str) -> Value {
        match self.body {
            Body::Nodes(nodes) => document_to_value(wrap_faq_questions_into_cards(nodes, class)),
            Body::Json(value) => wrap_cards_value(value, class),
        }
    }
}
