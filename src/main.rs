//! faqmark - Markdown FAQ pages to accordion data.

mod cli;
mod compiler;
mod config;
mod core;
mod faq;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;
use faq::FaqContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ProjectConfig::load(&cli)?;

    // One clock reading per run, shared by every file
    let ctx = cli.today.map_or_else(FaqContext::now, FaqContext::on);
    debug!("faq"; "today is {}, {} days until the deadline", ctx.today(), ctx.days_until_deadline());

    match &cli.command {
        Commands::Build { .. } => cli::build::build_faqs(&config, &ctx, false).map(|_| ()),
        Commands::Query { args } => cli::query::run_query(args, &config, &ctx),
        Commands::Cards { args } => cli::cards::run_cards(args, &config),
        Commands::Validate { args } => cli::validate::validate_faqs(args, &config, &ctx),
    }
}
