// src/checker/html.rs
// =============================================================================
// This module pulls href values out of raw HTML found in markdown.
//
// Markdown allows plain HTML (`<a href="...">`) next to markdown links.
// pulldown-cmark hands those through untouched, so we parse them with the
// `scraper` crate, which:
// - Parses HTML (even fragments like a lone opening tag) into a DOM
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The hrefs are returned exactly as written; relative targets stay relative.
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

// Builds the "every <a> with an href" selector
pub fn anchor_selector() -> Result<Selector> {
    Selector::parse("a[href]").map_err(|e| anyhow!("invalid anchor selector: {:?}", e))
}

// Extracts the href of every anchor in an HTML fragment, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   result = ["/docs"]
pub fn extract_html_hrefs(selector: &Selector, html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    fragment
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like jQuery or querySelector)
//    - "a[href]" means "all <a> tags that have an href attribute"
//
// 2. Why parse_fragment instead of parse_document?
//    - We only ever see a snippet of HTML from one markdown line
//    - parse_fragment doesn't invent <html>/<head>/<body> around it
//
// 3. What does .value() do?
//    - element is an ElementRef (reference to an HTML element)
//    - .value() gets the underlying Element
//    - .attr("href") gets the value of the href attribute
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(html: &str) -> Vec<String> {
        extract_html_hrefs(&anchor_selector().unwrap(), html)
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(hrefs(html), vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_relative_link_is_kept_as_written() {
        assert_eq!(hrefs(r#"<a href="../about">About</a>"#), vec!["../about"]);
    }

    #[test]
    fn test_lone_opening_tag() {
        assert_eq!(hrefs(r#"<a href="/docs">"#), vec!["/docs"]);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        assert!(hrefs(r#"<a name="top"></a>"#).is_empty());
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <img src="/logo.png">
        "#;
        assert_eq!(hrefs(html), vec!["https://rust-lang.org", "/docs"]);
    }
}
