//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content/faq"     # Source directory for .md and .json files
//! output = "public/faq"       # One <name>.json of FAQ records per source
//! pretty = false              # Pretty-print output JSON
//! cards = false               # Also write <name>.cards.json (card-wrapped AST)
//! skip_drafts = true          # Skip files with `draft: true` frontmatter
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Pretty-print output JSON.
    pub pretty: bool,

    /// Write card-wrapped documents next to the records.
    pub cards: bool,

    /// Skip draft pages.
    pub skip_drafts: bool,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content/faq".into(),
            output: "public/faq".into(),
            pretty: false,
            cards: false,
            skip_drafts: true,
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath("build.content");
    pub const OUTPUT: FieldPath = FieldPath("build.output");

    /// Validate build configuration (after path normalization).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.content == self.output {
            diag.error_with_hint(
                Self::OUTPUT,
                "output directory is the same as the content directory",
                "`--clean` would delete your sources; pick a separate directory",
            );
        } else if self.content.starts_with(&self.output) {
            diag.error(Self::CONTENT, "content directory is inside the output directory");
        }
    }
}
