//! FAQ build: every content file to a JSON array of FAQ records.
//!
//! Pipeline:
//! - **Init** - clean (optional) and create the output dir
//! - **Collect** - gather markdown and AST JSON files under the content dir
//! - **Transform** - parallel load + record extraction, one output per file
//! - **Finalize** - summary and error report

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::common::{display_path, write_json_file};
use crate::compiler::{Source, collect_content_files};
use crate::config::ProjectConfig;
use crate::core::ContentKind;
use crate::faq::{CARD_CLASS, FaqContext, card_count};
use crate::logger::BuildProgress;
use crate::utils::path::output_path;
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Output file suffix for FAQ records.
const RECORDS_SUFFIX: &str = ".json";
/// Output file suffix for card-wrapped documents.
const CARDS_SUFFIX: &str = ".cards.json";

/// Totals for one build.
#[derive(Debug, Default)]
pub struct BuildStats {
    pub files: AtomicUsize,
    pub questions: AtomicUsize,
    pub new: AtomicUsize,
    pub cards: AtomicUsize,
    pub drafts_skipped: AtomicUsize,
}

impl BuildStats {
    fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }

    fn add(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }
}

/// Build all content files.
///
/// `quiet` hides the progress line and summary.
pub fn build_faqs(config: &ProjectConfig, ctx: &FaqContext, quiet: bool) -> Result<BuildStats> {
    let content_dir = &config.build.content;
    if !content_dir.is_dir() {
        bail!("content directory not found: {}", content_dir.display());
    }

    init_output(&config.build.output, config.build.clean)?;

    let files = collect_content_files(content_dir);
    debug!(
        "build"; "{} under {}, deadline in {} days",
        plural_count(files.len(), "content file"),
        content_dir.display(),
        ctx.days_until_deadline()
    );

    let progress = (!quiet).then(|| create_progress(&files));
    let stats = BuildStats::default();

    let errors: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .filter_map(|file| {
            let result = build_file(file, config, ctx, &stats);
            if let (Some(progress), Some(kind)) = (&progress, ContentKind::from_path(file)) {
                progress.tick(kind);
            }
            result.err().map(|e| (file.clone(), e))
        })
        .collect();

    if let Some(progress) = progress {
        progress.finish();
    }

    if !errors.is_empty() {
        for (file, err) in &errors {
            log!("error"; "{}: {:#}", display_path(file, config.root()), err);
        }
        bail!("build failed: {}", plural_count(errors.len(), "file"));
    }

    if !quiet {
        log_summary(&stats, config);
    }

    Ok(stats)
}

/// Prepare the output directory.
fn init_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
        debug!("build"; "cleaned {}", output.display());
    }
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))
}

fn create_progress(files: &[PathBuf]) -> BuildProgress {
    let totals: Vec<_> = ContentKind::ALL
        .into_iter()
        .map(|kind| {
            let total = files
                .iter()
                .filter(|f| ContentKind::from_path(f) == Some(kind))
                .count();
            (kind, total)
        })
        .collect();
    BuildProgress::start(&totals)
}

/// Transform one file and write its outputs.
fn build_file(file: &Path, config: &ProjectConfig, ctx: &FaqContext, stats: &BuildStats) -> Result<()> {
    let source = Source::load(file)?;

    if config.build.skip_drafts && source.is_draft() {
        debug!("build"; "skipping draft {}", display_path(file, config.root()));
        BuildStats::add(&stats.drafts_skipped, 1);
        return Ok(());
    }

    let build = &config.build;
    let records = source.records(ctx);
    let out = output_path(file, &build.content, &build.output, RECORDS_SUFFIX);
    write_json_file(&out, &records, build.pretty)?;

    BuildStats::add(&stats.files, 1);
    BuildStats::add(&stats.questions, records.len());
    BuildStats::add(&stats.new, records.iter().filter(|r| r.is_new).count());

    if build.cards {
        BuildStats::add(&stats.cards, card_count(&source.nodes()));
        let cards = source.into_cards(CARD_CLASS);
        let out = output_path(file, &build.content, &build.output, CARDS_SUFFIX);
        write_json_file(&out, &cards, build.pretty)?;
    }

    Ok(())
}

fn log_summary(stats: &BuildStats, config: &ProjectConfig) {
    let drafts = BuildStats::get(&stats.drafts_skipped);
    if drafts > 0 {
        log!("build"; "{} skipped", plural_count(drafts, "draft"));
    }

    log!(
        "build"; "built {}, {}, {} new",
        plural_count(BuildStats::get(&stats.files), "file"),
        plural_count(BuildStats::get(&stats.questions), "question"),
        BuildStats::get(&stats.new)
    );

    if config.build.cards {
        log!("build"; "wrapped {}", plural_count(BuildStats::get(&stats.cards), "card"));
    }
    log!("build"; "output in {}", display_path(&config.build.output, config.root()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn setup() -> (TempDir, ProjectConfig) {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(content.join("guides")).unwrap();
        fs::write(
            content.join("wcag.md"),
            "## Basics\n\n### What is WCAG?\n\n{new:2026-04-18}\n\nA standard.\n\n### Who maintains it?\n\nThe W3C.\n",
        )
        .unwrap();
        fs::write(
            content.join("guides/aria.json"),
            json!([["h3", {}, "What is ARIA?"], ["p", {}, "Attributes."]]).to_string(),
        )
        .unwrap();
        fs::write(content.join("draft.md"), "---\ndraft: true\n---\n### Hidden\n\nx\n").unwrap();

        let mut config = ProjectConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.content = content;
        config.build.output = dir.path().join("public");
        (dir, config)
    }

    fn ctx() -> FaqContext {
        FaqContext::on(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap())
    }

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_writes_records() {
        let (dir, config) = setup();
        let stats = build_faqs(&config, &ctx(), true).unwrap();

        assert_eq!(BuildStats::get(&stats.files), 2);
        assert_eq!(BuildStats::get(&stats.questions), 3);
        assert_eq!(BuildStats::get(&stats.new), 1);
        assert_eq!(BuildStats::get(&stats.drafts_skipped), 1);

        let wcag = read(&dir.path().join("public/wcag.json"));
        assert_eq!(wcag[0]["question"], json!("What is WCAG?"));
        assert_eq!(wcag[0]["isNew"], json!(true));
        assert_eq!(wcag[0]["newDate"], json!("2026-04-18"));
        assert_eq!(wcag[1]["newDate"], Value::Null);

        let aria = read(&dir.path().join("public/guides/aria.json"));
        assert_eq!(aria[0]["answer"], json!([["p", {}, "Attributes."]]));

        assert!(!dir.path().join("public/draft.json").exists());
        assert!(!dir.path().join("public/wcag.cards.json").exists());
    }

    #[test]
    fn test_build_cards_and_drafts() {
        let (dir, mut config) = setup();
        config.build.cards = true;
        config.build.skip_drafts = false;
        let stats = build_faqs(&config, &ctx(), true).unwrap();

        assert_eq!(BuildStats::get(&stats.files), 3);
        assert_eq!(BuildStats::get(&stats.cards), 4);

        let cards = read(&dir.path().join("public/wcag.cards.json"));
        assert_eq!(cards[0], json!(["h2", {}, "Basics"]));
        assert_eq!(cards[1][0], json!("div"));
        assert_eq!(cards[1][1], json!({"class": "qa-card"}));
    }

    #[test]
    fn test_build_clean_removes_stale_output() {
        let (dir, mut config) = setup();
        let stale = dir.path().join("public/old.json");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "[]").unwrap();

        config.build.clean = true;
        build_faqs(&config, &ctx(), true).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_build_reports_invalid_files() {
        let (dir, config) = setup();
        fs::write(dir.path().join("content/broken.json"), "[").unwrap();
        let err = build_faqs(&config, &ctx(), true).unwrap_err();
        assert!(err.to_string().contains("build failed"));
    }

    #[test]
    fn test_build_missing_content_dir() {
        let (dir, mut config) = setup();
        config.build.content = dir.path().join("nope");
        assert!(build_faqs(&config, &ctx(), true).is_err());
    }
}
