// src/snippets/annotation.rs
// =============================================================================
// This module turns a snippet annotation into something we can fetch.
//
// An annotation is a markdown comment placed right above a code block:
//
//   <!-- https://raw.example.com/src/lib.rs#L10-L14 -->
//
// The URL before `#` is the remote file, the fragment is the line range.
// Accepted fragments:
//   #L10        -> line 10 only
//   #L10-L14    -> lines 10 through 14 (inclusive, 1-indexed)
//   #L10-14     -> same, the second `L` is optional
// =============================================================================

use regex::Regex;
use std::fmt;
use url::Url;

/// A parsed annotation: which remote file and which lines of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetAnnotation {
    /// The remote file, without the `#L..` fragment
    pub base_url: String,
    /// First line, 1-indexed
    pub start_line: usize,
    /// Last line, inclusive. Equal to `start_line` for single-line references.
    pub end_line: usize,
}

/// Raised when an annotation can't be read as `<url>#L<start>[-L<end>]`.
///
/// This is fatal for a snippet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedAnnotation {
    pub annotation: String,
    pub reason: String,
}

impl MalformedAnnotation {
    fn new(annotation: &str, reason: impl Into<String>) -> Self {
        Self {
            annotation: annotation.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed snippet annotation `{}`: {}", self.annotation, self.reason)
    }
}

impl std::error::Error for MalformedAnnotation {}

// Parses annotation URLs
//
// The compiled fragment pattern lives here rather than in a global, so each
// run builds its own resolver and hands it to the scanner.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    fragment: Regex,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        // The pattern is a literal, so this can only fail if it's edited badly
        let fragment = Regex::new(r"^L([0-9]+)(?:-L?([0-9]+))?$").expect("valid fragment pattern");
        Self { fragment }
    }

    // Resolves the annotation token that follows `<!--` on the comment line
    //
    // A `-->` glued to the end of the token is tolerated.
    //
    // Example:
    //   "https://host/a.rs#L2-L3" -> base_url "https://host/a.rs", lines 2..=3
    pub fn resolve(&self, token: &str) -> Result<SnippetAnnotation, MalformedAnnotation> {
        let url = token.strip_suffix("-->").unwrap_or(token);

        let (base, fragment) = url
            .split_once('#')
            .ok_or_else(|| MalformedAnnotation::new(token, "missing `#L<line>` fragment"))?;

        let captures = self.fragment.captures(fragment).ok_or_else(|| {
            MalformedAnnotation::new(token, format!("`#{}` is not a line reference", fragment))
        })?;

        let start_line = parse_line(token, &captures[1])?;
        let end_line = match captures.get(2) {
            Some(end) => parse_line(token, end.as_str())?,
            None => start_line,
        };

        if start_line == 0 {
            return Err(MalformedAnnotation::new(token, "line numbers start at 1"));
        }
        if end_line < start_line {
            return Err(MalformedAnnotation::new(
                token,
                format!("range ends ({}) before it starts ({})", end_line, start_line),
            ));
        }

        if let Err(e) = Url::parse(base) {
            return Err(MalformedAnnotation::new(
                token,
                format!("`{}` is not an absolute URL: {}", base, e),
            ));
        }

        Ok(SnippetAnnotation {
            base_url: base.to_string(),
            start_line,
            end_line,
        })
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

// The regex only lets ASCII digits through, so the only failure left is overflow
fn parse_line(token: &str, digits: &str) -> Result<usize, MalformedAnnotation> {
    digits
        .parse()
        .map_err(|_| MalformedAnnotation::new(token, format!("line number {} is too large", digits)))
}
