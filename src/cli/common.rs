//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compiler::collect_content_files as collect_dir;
use crate::core::ContentKind;
use crate::log;
use crate::utils::path::resolve_path;

/// Collect content files based on CLI paths
///
/// No paths means every content file under `content_dir`. A single `-` reads
/// the path list from stdin.
pub fn collect_content_files(paths: &[PathBuf], content_dir: &Path) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(collect_dir(content_dir));
    }

    let mut all_files = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, content_dir);

        if resolved.is_file() {
            if ContentKind::is_content_file(&resolved) {
                all_files.push(resolved);
            } else {
                anyhow::bail!("Not a supported content file: {}", path.display());
            }
        } else if resolved.is_dir() {
            all_files.extend(collect_dir(&resolved));
        } else {
            let content_relative = content_dir.join(path);
            anyhow::bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                content_relative.display()
            );
        }
    }

    Ok(all_files)
}

/// Read file paths from stdin, one per line
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    read_paths(io::stdin().lock())
}

fn read_paths(reader: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

/// Serialize to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write a JSON file, creating parent directories.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut json = to_json(value, pretty)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Print JSON to stdout, or write it to `output` when given.
pub fn emit_json<T: Serialize + ?Sized>(
    module: &str,
    value: &T,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            write_json_file(path, value, pretty)?;
            log!(module; "wrote output to {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", to_json(value, pretty)?)?;
        }
    }
    Ok(())
}

/// Path for display, relative to `root` when possible.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
