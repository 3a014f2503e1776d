//! Content validation command.
//!
//! Authoring checks for FAQ files:
//!
//! | Check                                   | Severity |
//! |-----------------------------------------|----------|
//! | tag-like token without a valid date     | error    |
//! | h3 with no question text                | warning  |
//! | tag dated in the future                 | warning  |
//! | tag older than the freshness window     | warning  |

mod report;

use anyhow::Result;
use rayon::prelude::*;

use super::common::{collect_content_files, display_path};
use crate::cli::args::ValidateArgs;
use crate::compiler::Source;
use crate::config::ProjectConfig;
use crate::faq::tag::{NEW_WINDOW_DAYS, days_since, extract_tagged_date, malformed_tags};
use crate::faq::{FaqContext, Node, extract_text, question_sections};
use crate::log;
use crate::utils::plural::plural_count;

use report::{Finding, ValidationReport};

/// Validate FAQ content files
pub fn validate_faqs(args: &ValidateArgs, config: &ProjectConfig, ctx: &FaqContext) -> Result<()> {
    let files = collect_content_files(&args.paths, &config.build.content)?;

    if files.is_empty() {
        log!("validate"; "no content files found");
        return Ok(());
    }

    log!("validate"; "validating {}", plural_count(files.len(), "file"));

    let root = config.root();
    let checked: Vec<(String, Vec<Finding>)> = files
        .par_iter()
        .map(|file| {
            let source = display_path(file, root);
            let findings = match Source::load(file) {
                Ok(loaded) => check_source(&loaded, ctx),
                Err(e) => vec![Finding::error("file", format!("{e:#}"))],
            };
            (source, findings)
        })
        .collect();

    let mut report = ValidationReport::default();
    for (source, findings) in checked {
        report.add(&source, findings, args.warn_only);
    }

    report.print();
    log!("validate"; "{}", report);

    if report.error_count() > 0 {
        anyhow::bail!(
            "found {} with invalid tags",
            plural_count(report.error_file_count(), "file")
        );
    }

    Ok(())
}

/// Run every check against one loaded document.
fn check_source(source: &Source, ctx: &FaqContext) -> Vec<Finding> {
    let nodes = source.nodes();
    let mut findings = Vec::new();

    check_malformed_tags(&nodes, &mut findings);
    check_sections(&nodes, ctx, &mut findings);

    findings
}

/// Tag-like tokens that never count as a date.
fn check_malformed_tags(nodes: &[Node], findings: &mut Vec<Finding>) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                for raw in malformed_tags(text) {
                    findings.push(Finding::error(
                        format!("`{raw}`"),
                        "is not a valid tag, expected {new:YYYY-MM-DD} with a real date",
                    ));
                }
            }
            Node::Element(elem) => check_malformed_tags(&elem.children, findings),
            Node::Other(_) => {}
        }
    }
}

/// Question headings and the freshness of their tags.
fn check_sections(nodes: &[Node], ctx: &FaqContext, findings: &mut Vec<Finding>) {
    let today = ctx.today();

    for (index, (heading, answer)) in question_sections(nodes).enumerate() {
        let question = extract_text(heading).trim().to_string();
        if question.is_empty() {
            findings.push(Finding::warning(
                format!("question #{}", index + 1),
                "has no text, its answer is skipped",
            ));
            continue;
        }

        let Some(date) = extract_tagged_date(answer) else {
            continue;
        };
        let Some(age) = days_since(&date, today) else {
            continue;
        };

        if age < 0 {
            findings.push(Finding::warning(
                format!("\"{question}\""),
                format!(
                    "is tagged {date}, {} in the future",
                    plural_count(age.unsigned_abs() as usize, "day")
                ),
            ));
        } else if age > NEW_WINDOW_DAYS {
            findings.push(Finding::warning(
                format!("\"{question}\""),
                format!(
                    "is tagged {date}, no longer new (expired {} ago), tag can be removed",
                    plural_count((age - NEW_WINDOW_DAYS) as usize, "day")
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentKind;
    use chrono::NaiveDate;
    use report::Severity;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn ctx() -> FaqContext {
        FaqContext::on(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap())
    }

    fn check(md: &str) -> Vec<Finding> {
        let source = Source::parse(Path::new("faq.md"), ContentKind::Markdown, md).unwrap();
        check_source(&source, &ctx())
    }

    #[test]
    fn test_clean_document() {
        let md = "### Fresh\n\n{new:2026-04-15}\n\nAnswer\n\n### Plain\n\nAnswer\n";
        assert!(check(md).is_empty());
    }

    #[test]
    fn test_malformed_tags_are_errors() {
        let md = "### Q\n\n{new:2026-02-30}\n\nText <!-- new: soon --> here\n";
        let findings = check(md);
        let errors: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| f.target.as_str())
            .collect();
        assert_eq!(errors, vec!["`{new:2026-02-30}`", "`<!-- new: soon -->`"]);
    }

    #[test]
    fn test_empty_question_warning() {
        let findings = check("### Q\n\nA\n\n### \n\nB\n");
        assert_eq!(findings, vec![Finding::warning("question #2", "has no text, its answer is skipped")]);
    }

    #[test]
    fn test_future_and_expired_tags() {
        let md = "### Soon\n\n{new:2026-04-22}\n\nA\n\n### Old\n\n{new:2026-04-01}\n\nB\n\n### Edge\n\n{new:2026-04-10}\n\nC\n";
        let findings = check(md);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
        assert_eq!(findings[0].target, "\"Soon\"");
        assert!(findings[0].reason.contains("2 days in the future"));
        assert_eq!(findings[1].target, "\"Old\"");
        assert!(findings[1].reason.contains("expired 9 days ago"));
    }

    #[test]
    fn test_validate_faqs_fails_on_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), "### Q\n\n{new:2026-13-01}\n\nA\n").unwrap();
        fs::write(dir.path().join("good.md"), "### Q\n\nA\n").unwrap();

        let mut config = ProjectConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.content = dir.path().to_path_buf();

        let args = ValidateArgs {
            paths: vec![],
            warn_only: false,
        };
        assert!(validate_faqs(&args, &config, &ctx()).is_err());

        let args = ValidateArgs {
            paths: vec![],
            warn_only: true,
        };
        assert!(validate_faqs(&args, &config, &ctx()).is_ok());
    }
}
