//! Content file kinds.

use std::path::Path;

/// Kind of content file, determines how it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Markdown file (.md) - converted with pulldown-cmark
    Markdown,
    /// Pre-parsed AST document (.json)
    Ast,
}

impl ContentKind {
    /// All kinds, in progress display order.
    pub const ALL: [Self; 2] = [Self::Markdown, Self::Ast];

    /// Detect content kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "json" => Some(Self::Ast),
            _ => None,
        }
    }

    /// Detect content kind from file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Display name for this content kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Ast => "json",
        }
    }

    /// Check if a path is a content file.
    #[inline]
    pub fn is_content_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}
