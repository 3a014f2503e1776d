//! Frontmatter metadata for FAQ markdown files.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata declared at the top of a content file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub draft: bool,
    /// Additional user-defined fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata extractor for Markdown files.
///
/// Supports YAML-like (`---`) and TOML (`+++`) frontmatter.
pub struct MarkdownMetaExtractor;

impl MarkdownMetaExtractor {
    /// Extract frontmatter and return (metadata, body).
    pub fn extract_frontmatter<'a>(&self, content: &'a str) -> Result<Option<(FaqMeta, &'a str)>> {
        match Self::detect_frontmatter(content) {
            Some((fm, body, is_toml)) => {
                let meta = if is_toml {
                    Self::parse_toml(fm)?
                } else {
                    Self::parse_yaml_like(fm)
                };
                Ok(Some((meta, body)))
            }
            None => Ok(None),
        }
    }

    /// Parse simple YAML-like frontmatter (key: value).
    fn parse_yaml_like(content: &str) -> FaqMeta {
        let mut meta = FaqMeta::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim().to_lowercase().as_str() {
                "title" => meta.title = Some(value.to_string()),
                "date" => meta.date = Some(value.to_string()),
                "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                _ => {
                    // Custom field -> extra (preserve original key case)
                    meta.extra
                        .insert(key.trim().to_string(), parse_yaml_value(value));
                }
            }
        }

        meta
    }

    /// Parse TOML frontmatter.
    fn parse_toml(content: &str) -> Result<FaqMeta> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML frontmatter: {}", e))
    }

    /// Detect and extract frontmatter.
    /// Returns `(frontmatter, body, is_toml)` if found.
    fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
        let trimmed = content.trim_start();

        for (fence, is_toml) in [("---", false), ("+++", true)] {
            if trimmed.starts_with(fence)
                && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
            {
                let fm = trimmed[3..3 + end].trim();
                let body = trimmed[3 + end + 4..].trim_start_matches(['\r', '\n']);
                return Some((fm, body, is_toml));
            }
        }

        None
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }
    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        return Value::Array(arr);
    }

    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: \"Accessibility FAQ\"\ndate: 2026-04-01\n---\n\n## Basics";
        let (meta, body) = MarkdownMetaExtractor
            .extract_frontmatter(content)
            .unwrap()
            .unwrap();

        assert_eq!(meta.title.as_deref(), Some("Accessibility FAQ"));
        assert_eq!(meta.date.as_deref(), Some("2026-04-01"));
        assert!(!meta.draft);
        assert!(body.starts_with("## Basics"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"FAQ\"\ndraft = true\nowner = \"a11y\"\n+++\n\n### Q";
        let (meta, body) = MarkdownMetaExtractor
            .extract_frontmatter(content)
            .unwrap()
            .unwrap();

        assert_eq!(meta.title.as_deref(), Some("FAQ"));
        assert!(meta.draft);
        assert_eq!(meta.extra.get("owner"), Some(&json!("a11y")));
        assert_eq!(body, "### Q");
    }

    #[test]
    fn test_invalid_toml_frontmatter() {
        let content = "+++\ntitle = \n+++\nbody";
        assert!(MarkdownMetaExtractor.extract_frontmatter(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        let result = MarkdownMetaExtractor
            .extract_frontmatter("### Just a question")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter() {
        // A lone rule with no closing fence is content
        let result = MarkdownMetaExtractor
            .extract_frontmatter("---\n### Q\nAnswer")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content = "---\ndraft: TRUE\nreviewers: ana, li\npriority: 2\n---\n";
        let (meta, _) = MarkdownMetaExtractor
            .extract_frontmatter(content)
            .unwrap()
            .unwrap();

        assert!(meta.draft);
        assert_eq!(meta.extra.get("reviewers"), Some(&json!(["ana", "li"])));
        assert_eq!(meta.extra.get("priority"), Some(&json!(2)));
    }
}
