// src/snippets/mod.rs
// =============================================================================
// This module checks that annotated code blocks still match their source.
//
// Submodules:
// - annotation: Parses `<!-- https://host/file#L10-L14 -->` into URL + lines
// - scanner: Finds annotated code blocks in a markdown document
// - fetch: Downloads the remote file
// - verify: Compares the local block with the remote line range
//
// The check is fail-fast: files are handled in walk order, snippets in
// document order, and the first mismatch ends the run. Nothing after it is
// fetched or compared.
// =============================================================================

mod annotation;
mod fetch;
mod scanner;
mod verify;

pub use annotation::MalformedAnnotation;

use crate::files::collect_markdown_files;
use annotation::ReferenceResolver;
use anyhow::{Context, Result};
use fetch::RemoteFetcher;
use scanner::{Snippet, SnippetScanner};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use verify::VerificationResult;

/// What a snippet run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every snippet matched (or there were none)
    Verified,
    /// The first snippet that didn't match; nothing after it was checked
    Mismatch(Mismatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: PathBuf,
    /// Line of the annotation comment
    pub line: usize,
    pub base_url: String,
    pub result: VerificationResult,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error in {} (annotation at line {})", self.path.display(), self.line)?;
        writeln!(f, "Code in document:")?;
        writeln!(f, "{}", self.result.local)?;
        writeln!(f, "Code from {}:", self.base_url)?;
        write!(f, "{}", self.result.reference)
    }
}

// A markdown file read into memory. Dropped once it has been scanned.
struct MarkdownDocument {
    path: PathBuf,
    text: String,
}

impl MarkdownDocument {
    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

// Everything one snippet run needs: the annotation parser and an HTTP client
pub struct SnippetChecker {
    resolver: ReferenceResolver,
    fetcher: RemoteFetcher,
}

impl SnippetChecker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            resolver: ReferenceResolver::new(),
            fetcher: RemoteFetcher::new()?,
        })
    }

    // Checks every markdown file under `root`, skipping `excludes`
    //
    // Prints "Checking code in the <path>" for each file it opens.
    //
    // Errors: unreadable files or directories, a malformed annotation
    // (MalformedAnnotation), or a reference that can't be downloaded
    pub async fn check_tree(&self, root: &Path, excludes: &[PathBuf]) -> Result<Outcome> {
        let files = collect_markdown_files(root, excludes)?;

        for path in &files {
            println!("Checking code in the {}", path.display());

            let outcome = self.check_document(path).await?;
            if let Outcome::Mismatch(_) = outcome {
                return Ok(outcome);
            }
        }

        Ok(Outcome::Verified)
    }

    pub async fn check_document(&self, path: &Path) -> Result<Outcome> {
        let document = MarkdownDocument::read(path)?;
        let mut scanner = SnippetScanner::new(&self.resolver);

        for line in document.lines() {
            if let Some(snippet) = scanner.feed(line)? {
                if let Some(mismatch) = self.check_snippet(&document.path, snippet).await? {
                    return Ok(Outcome::Mismatch(mismatch));
                }
            }
        }

        if let Some(snippet) = scanner.finalize()? {
            if let Some(mismatch) = self.check_snippet(&document.path, snippet).await? {
                return Ok(Outcome::Mismatch(mismatch));
            }
        }

        Ok(Outcome::Verified)
    }

    async fn check_snippet(&self, path: &Path, snippet: Snippet) -> Result<Option<Mismatch>> {
        let remote = self.fetcher.fetch(&snippet.annotation.base_url).await?;
        let result = verify::verify(&snippet.code, &remote, &snippet.annotation);

        if result.passed() {
            debug!(
                path = %path.display(),
                line = snippet.line,
                url = %snippet.annotation.base_url,
                "snippet verified"
            );
            return Ok(None);
        }

        Ok(Some(Mismatch {
            path: path.to_path_buf(),
            line: snippet.line,
            base_url: snippet.annotation.base_url,
            result,
        }))
    }
}
