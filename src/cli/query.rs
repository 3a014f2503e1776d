//! Query command implementation.
//!
//! Transforms content files in parallel and prints their FAQ records as JSON.

use std::path::PathBuf;

use anyhow::Result;
use rayon::prelude::*;
use serde_json::{Map, Value};

use super::common::{collect_content_files, display_path, emit_json};
use crate::cli::args::QueryArgs;
use crate::compiler::Source;
use crate::config::ProjectConfig;
use crate::faq::{FaqContext, FaqRecord};
use crate::log;
use crate::utils::plural::plural_count;

/// Records of one queried file
#[derive(Debug)]
pub struct FileQueryResult {
    pub path: String,
    pub title: Option<String>,
    pub records: Vec<FaqRecord>,
}

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &ProjectConfig, ctx: &FaqContext) -> Result<()> {
    let files = collect_content_files(&args.paths, &config.build.content)?;
    log!("query"; "querying {}", plural_count(files.len(), "file"));

    let results = query_files(&files, args, config, ctx);
    let total: usize = results.iter().map(|r| r.records.len()).sum();
    log!("query"; "found {}", plural_count(total, "question"));

    let output = format_results(&results, args.fields.as_deref());
    emit_json("query", &output, args.pretty, args.output.as_deref())
}

fn query_files(
    files: &[PathBuf],
    args: &QueryArgs,
    config: &ProjectConfig,
    ctx: &FaqContext,
) -> Vec<FileQueryResult> {
    let root = config.root();

    // par_iter + collect keeps file order
    files
        .par_iter()
        .filter_map(|file| {
            let source = match Source::load(file) {
                Ok(source) => source,
                Err(e) => {
                    log!("warning"; "failed to query {}: {:#}", display_path(file, root), e);
                    return None;
                }
            };
            if source.is_draft() && !args.drafts {
                return None;
            }

            let mut records = source.records(ctx);
            if args.new_only {
                records.retain(|r| r.is_new);
            }

            Some(FileQueryResult {
                path: display_path(file, root),
                title: source.meta.and_then(|m| m.title),
                records,
            })
        })
        .collect()
}

// ============================================================================
// Output Formatting
// ============================================================================

/// One object per file with `path` first, then `title` when present.
fn format_results(results: &[FileQueryResult], fields: Option<&[String]>) -> Value {
    let files = results
        .iter()
        .map(|result| {
            let mut obj = Map::new();
            obj.insert("path".to_string(), Value::String(result.path.clone()));
            if let Some(title) = &result.title {
                obj.insert("title".to_string(), Value::String(title.clone()));
            }

            let records = result
                .records
                .iter()
                .map(|record| format_record(record, fields))
                .collect();
            obj.insert("records".to_string(), Value::Array(records));

            Value::Object(obj)
        })
        .collect();

    Value::Array(files)
}

/// Serialize a record, keeping only `fields` (in the given order) when set.
fn format_record(record: &FaqRecord, fields: Option<&[String]>) -> Value {
    let value = serde_json::to_value(record).unwrap_or_default();
    let (Some(fields), Value::Object(obj)) = (fields, &value) else {
        return value;
    };

    let filtered = fields
        .iter()
        .map(|field| (field.clone(), obj.get(field).cloned().unwrap_or(Value::Null)))
        .collect();
    Value::Object(filtered)
}
