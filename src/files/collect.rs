// src/files/collect.rs
// =============================================================================
// This module walks a directory tree and collects markdown file paths.
//
// We use the `ignore` crate's WalkBuilder (the walker behind ripgrep), but
// with all of its filters switched off: hidden directories and gitignored
// files are documentation too, and a directory is only skipped when the
// caller excludes it explicitly.
//
// Rust concepts:
// - Path vs PathBuf: borrowed vs owned file system paths
// - Iterators with `?`: stop at the first I/O error
// =============================================================================

use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

const MARKDOWN_SUFFIX: &str = ".md";

// Collects every markdown file under `root`, recursively
//
// Parameters:
//   root: directory to walk
//   excludes: directories (relative to root) whose files are skipped. A file
//             is skipped when its parent directory is exactly one of them;
//             files in deeper subdirectories are still collected.
//
// Returns: paths in walk order (entries sorted by file name at each level)
//
// Errors: the root is missing or not a directory, or an entry can't be read
pub fn collect_markdown_files(root: &Path, excludes: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("cannot read directory {}", root.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let excluded: Vec<PathBuf> = excludes.iter().map(|dir| root.join(dir)).collect();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;

        let is_file = entry.file_type().is_some_and(|kind| kind.is_file());
        if !is_file || !is_markdown(entry.path()) {
            continue;
        }

        if is_excluded(entry.path(), &excluded) {
            debug!(path = %entry.path().display(), "skipping file in excluded directory");
            continue;
        }

        files.push(entry.into_path());
    }

    debug!(root = %root.display(), count = files.len(), "collected markdown files");
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(MARKDOWN_SUFFIX))
}

// Exact match on the parent directory
fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    match path.parent() {
        Some(parent) => excluded.iter().any(|dir| dir.as_path() == parent),
        None => false,
    }
}
