//! Cards command: print one document with its questions wrapped into cards.

use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use super::common::emit_json;
use crate::cli::args::CardsArgs;
use crate::compiler::Source;
use crate::config::ProjectConfig;
use crate::faq::CARD_CLASS;
use crate::utils::path::resolve_path;

/// Execute cards command
pub fn run_cards(args: &CardsArgs, config: &ProjectConfig) -> Result<()> {
    let path = resolve_path(&args.path, &config.build.content);
    let cards = load_cards(&path)?;
    emit_json("cards", &cards, args.pretty, args.output.as_deref())
}

fn load_cards(path: &Path) -> Result<Value> {
    Ok(Source::load(path)?.into_cards(CARD_CLASS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_cards_markdown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faq.md");
        fs::write(&path, "### Q1\n\nA1\n\n## Part\n\n### Q2\n").unwrap();

        let cards = load_cards(&path).unwrap();
        assert_eq!(
            cards,
            json!([
                ["div", {"class": "qa-card"}, ["h3", {}, "Q1"], ["p", {}, "A1"]],
                ["h2", {}, "Part"],
                ["div", {"class": "qa-card"}, ["h3", {}, "Q2"]]
            ])
        );
    }

    #[test]
    fn test_load_cards_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_cards(&dir.path().join("none.md")).is_err());
    }
}
