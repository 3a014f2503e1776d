//! Path normalization and output path mapping.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - user-supplied paths relative to cwd or the content dir
//! - `output_path` - where the JSON for a content file is written

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to joining with the current directory when the path does not exist.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a path that may be relative to cwd or a fallback directory.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to fallback_dir
///
/// So both `content/faq/wcag.md` and `wcag.md` find the same file.
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }

    normalize_path(&fallback_dir.join(path))
}

/// Map a content file to its output file.
///
/// `<content>/guides/wcag.md` becomes `<output>/guides/wcag<suffix>`.
/// Files outside the content dir keep only their file name.
pub fn output_path(source: &Path, content_dir: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let relative = source
        .strip_prefix(content_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| source.file_name().map(PathBuf::from).unwrap_or_default());

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{suffix}");

    match relative.parent() {
        Some(parent) => output_dir.join(parent).join(file_name),
        None => output_dir.join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.md"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_absolute() {
        let resolved = resolve_path(Path::new("/absolute/faq.md"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/absolute/faq.md"));
    }

    #[test]
    fn test_resolve_path_fallback() {
        let resolved = resolve_path(Path::new("nonexistent/faq.md"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/nonexistent/faq.md"));
    }

    #[test]
    fn test_output_path_mirrors_tree() {
        let out = output_path(
            Path::new("/site/content/guides/wcag.md"),
            Path::new("/site/content"),
            Path::new("/site/public"),
            ".json",
        );
        assert_eq!(out, PathBuf::from("/site/public/guides/wcag.json"));
    }

    #[test]
    fn test_output_path_outside_content() {
        let out = output_path(
            Path::new("/tmp/extra.json"),
            Path::new("/site/content"),
            Path::new("/site/public"),
            ".cards.json",
        );
        assert_eq!(out, PathBuf::from("/site/public/extra.cards.json"));
    }
}
