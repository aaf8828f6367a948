// src/checker/markdown.rs
// =============================================================================
// This module extracts link targets from markdown files.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Hands raw HTML through as Html events, which we search for <a href>
//
// Each line is parsed on its own. A link whose text or target wraps onto the
// next line is not found, and reference-style links ([text][id]) only resolve
// when the definition is on the same line.
//
// Rust concepts:
// - Iterators: For processing sequences of items
// - Pattern matching: To identify link events
// - HashSet: To remember which targets we've already seen
// =============================================================================

use super::html::{anchor_selector, extract_html_hrefs};
use anyhow::{Context, Result};
use pulldown_cmark::{Event, Parser, Tag};
use scraper::Selector;
use std::collections::HashSet;
use std::path::PathBuf;

// Finds link targets in markdown text
pub struct AnchorExtractor {
    anchors: Selector,
}

impl AnchorExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            anchors: anchor_selector()?,
        })
    }

    // Extracts every link target from a single line
    //
    // Example input:
    //   "See [Rust](https://www.rust-lang.org) and <a href=\"intro.md\">intro</a>"
    //
    // Example output:
    //   vec!["https://www.rust-lang.org", "intro.md"]
    pub fn extract_line(&self, line: &str) -> Vec<String> {
        let mut targets = Vec::new();

        for event in Parser::new(line) {
            match event {
                // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
                Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                    targets.push(dest_url.to_string());
                }

                // Raw HTML, either a whole HTML line or an inline tag
                Event::Html(html) => {
                    targets.extend(extract_html_hrefs(&self.anchors, &html));
                }

                _ => {}
            }
        }

        targets.retain(|target| !target.is_empty());
        targets
    }

    // Extracts link targets from a whole document, line by line
    pub fn extract_document(&self, text: &str) -> Vec<String> {
        text.lines().flat_map(|line| self.extract_line(line)).collect()
    }
}

// Reads every file and gathers their link targets
//
// Returns: each target once, in the order it was first seen
pub fn collect_links(extractor: &AnchorExtractor, files: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;

        for target in extractor.extract_document(&text) {
            if seen.insert(target.clone()) {
                links.push(target);
            }
        }
    }

    Ok(links)
}
