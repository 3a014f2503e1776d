//! Command-line interface definitions.

use chrono::NaiveDate;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Markdown FAQ to accordion data
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: faqmark.toml)
    #[arg(short = 'C', long, default_value = "faqmark.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Treat this date as today for freshness badges and the deadline countdown
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Transform all content files into FAQ record JSON
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print FAQ records for content files
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Print a document with questions wrapped into cards
    Cards {
        #[command(flatten)]
        args: CardsArgs,
    },

    /// Check FAQ content for broken or stale "new" tags
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Pretty-print output JSON
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,

    /// Also write card-wrapped documents (`<name>.cards.json`)
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub cards: Option<bool>,

    /// Skip draft pages
    #[arg(short = 'E', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub skip_drafts: Option<bool>,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Paths to query (files, directories, or omit for all content).
    /// Use `-` to read paths from stdin (one per line).
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Include draft pages in results
    #[arg(short, long)]
    pub drafts: bool,

    /// Only keep questions currently flagged as new
    #[arg(short, long)]
    pub new_only: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Filter records to specific fields (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Cards command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CardsArgs {
    /// Markdown or AST JSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Files or directories to validate. If omitted, validates all content.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_today() {
        let cli = Cli::parse_from(["faqmark", "query", "--today", "2026-04-14", "faq.md"]);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 4, 14));
        let Commands::Query { args } = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.paths, vec![PathBuf::from("faq.md")]);
    }

    #[test]
    fn test_query_fields() {
        let cli = Cli::parse_from(["faqmark", "q", "-f", "question,isNew", "-n"]);
        let Commands::Query { args } = cli.command else {
            panic!("expected query");
        };
        assert!(args.new_only);
        assert_eq!(
            args.fields,
            Some(vec!["question".to_string(), "isNew".to_string()])
        );
    }

    #[test]
    fn test_invalid_today_rejected() {
        assert!(Cli::try_parse_from(["faqmark", "--today", "2026-02-30", "build"]).is_err());
    }
}
