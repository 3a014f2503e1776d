//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural::plural_s;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// The tag or heading that failed.
    pub target: String,
    /// Reason/message.
    pub reason: String,
}

impl Finding {
    pub fn error(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn warning(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Findings grouped by severity, then by source file.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, Vec<Finding>>,
    pub warnings: BTreeMap<String, Vec<Finding>>,
}

impl ValidationReport {
    /// Add findings for one file. `warn_only` demotes errors to warnings.
    pub fn add(&mut self, source: &str, findings: Vec<Finding>, warn_only: bool) {
        for mut finding in findings {
            if warn_only {
                finding.severity = Severity::Warning;
            }
            let group = match finding.severity {
                Severity::Error => &mut self.errors,
                Severity::Warning => &mut self.warnings,
            };
            group.entry(source.to_string()).or_default().push(finding);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    /// Count of files with errors.
    pub fn error_file_count(&self) -> usize {
        self.errors.len()
    }

    /// Print the full report to stderr (errors -> warnings).
    pub fn print(&self) {
        Self::print_section("errors", &self.errors, true);
        Self::print_section("warnings", &self.warnings, false);
    }

    fn print_section(name: &str, findings: &BTreeMap<String, Vec<Finding>>, is_error: bool) {
        if findings.is_empty() {
            return;
        }
        eprintln!();

        let file_count = findings.len();
        let count: usize = findings.values().map(Vec::len).sum();
        let header = if is_error {
            name.red().bold().to_string()
        } else {
            name.yellow().bold().to_string()
        };
        eprintln!(
            "{} {}",
            header,
            format!(
                "({file_count} file{}, {count} finding{})",
                plural_s(file_count),
                plural_s(count)
            )
            .dimmed()
        );

        for (path, items) in findings {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for finding in items {
                let arrow = if is_error {
                    "→".red().to_string()
                } else {
                    "→".yellow().to_string()
                };
                eprintln!("{} {} {}", arrow, finding.target, finding.reason);
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors == 0 && warnings == 0 {
            return write!(f, "{}", "all checks passed".green());
        }

        write!(
            f,
            "{} {} {}, {} {}",
            "found".dimmed(),
            errors.to_string().red().bold(),
            format!("error{}", plural_s(errors)).dimmed(),
            warnings.to_string().yellow().bold(),
            format!("warning{}", plural_s(warnings)).dimmed()
        )
    }
}
