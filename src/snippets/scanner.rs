// src/snippets/scanner.rs
// =============================================================================
// This module finds annotated code blocks in a markdown document.
//
// It is a small line-by-line state machine with two states:
//
//   OutsideCode --(line starts with `<!--`)--> InsideCode
//   InsideCode  --(line is exactly "```")----> OutsideCode
//
// While inside, a fence with a language tag ("```rust") is skipped and every
// other line is added to the code buffer. Once the block is closed, the next
// line (or the end of the document) hands the buffered code out as a
// `Snippet`, paired with the annotation that opened it.
//
// The scanner never touches the network. The caller decides what to do with
// each snippet as it comes out, so snippets are handled in document order.
//
// Rust concepts:
// - Enums as states: the compiler makes us handle both
// - std::mem::take: move a value out and leave an empty one behind
// - Lifetimes: the scanner borrows the resolver ('a) instead of owning it
// =============================================================================

use super::annotation::{MalformedAnnotation, ReferenceResolver, SnippetAnnotation};

const COMMENT_OPEN: &str = "<!--";
const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideCode,
    InsideCode,
}

/// An annotated code block, ready to be compared with its remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub annotation: SnippetAnnotation,
    /// Line of the annotation comment, 1-indexed
    pub line: usize,
    /// Block contents, one `\n` after every line
    pub code: String,
}

#[derive(Debug)]
struct OpenAnnotation {
    annotation: SnippetAnnotation,
    line: usize,
}

#[derive(Debug)]
pub struct SnippetScanner<'a> {
    resolver: &'a ReferenceResolver,
    state: ScanState,
    line_number: usize,
    current: Option<OpenAnnotation>,
    code: String,
    // An annotation that failed to parse while an earlier snippet was still
    // waiting to be handed out. Reported on the next call.
    deferred: Option<MalformedAnnotation>,
}

impl<'a> SnippetScanner<'a> {
    pub fn new(resolver: &'a ReferenceResolver) -> Self {
        Self {
            resolver,
            state: ScanState::OutsideCode,
            line_number: 0,
            current: None,
            code: String::new(),
            deferred: None,
        }
    }

    // Feeds the next line of the document (without its line ending)
    //
    // Returns: Some(snippet) when a finished block is ready to be verified
    //
    // Errors: an annotation whose URL can't be resolved
    pub fn feed(&mut self, line: &str) -> Result<Option<Snippet>, MalformedAnnotation> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        self.line_number += 1;

        match self.state {
            ScanState::InsideCode => {
                if is_language_fence(line) {
                    // Decorative, does not change state
                } else if line == FENCE {
                    self.state = ScanState::OutsideCode;
                } else {
                    self.code.push_str(line);
                    self.code.push('\n');
                }
                Ok(None)
            }
            ScanState::OutsideCode if line.starts_with(COMMENT_OPEN) => {
                let pending = self.take_pending();
                match self.open_annotation(line) {
                    Ok(()) => Ok(pending),
                    Err(err) if pending.is_some() => {
                        self.deferred = Some(err);
                        Ok(pending)
                    }
                    Err(err) => Err(err),
                }
            }
            ScanState::OutsideCode => Ok(self.take_pending()),
        }
    }

    // Ends the document
    //
    // Hands out the last snippet even when nothing follows its closing fence,
    // and also a block that was never closed.
    pub fn finalize(mut self) -> Result<Option<Snippet>, MalformedAnnotation> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        Ok(self.take_pending())
    }

    fn open_annotation(&mut self, line: &str) -> Result<(), MalformedAnnotation> {
        let token = line.split_whitespace().nth(1).ok_or_else(|| MalformedAnnotation {
            annotation: line.to_string(),
            reason: "no URL after `<!--`".to_string(),
        })?;

        let annotation = self.resolver.resolve(token)?;
        self.current = Some(OpenAnnotation {
            annotation,
            line: self.line_number,
        });
        self.code.clear();
        self.state = ScanState::InsideCode;
        Ok(())
    }

    // An empty buffer means there is nothing to verify yet
    fn take_pending(&mut self) -> Option<Snippet> {
        if self.code.is_empty() {
            return None;
        }
        let code = std::mem::take(&mut self.code);
        let open = self.current.take()?;
        Some(Snippet {
            annotation: open.annotation,
            line: open.line,
            code,
        })
    }
}

// "```rust", "```c++" and so on
fn is_language_fence(line: &str) -> bool {
    line.strip_prefix(FENCE)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does a bare "```" right after an annotation close the block?
//    - The annotation line itself switches us to InsideCode, so the opening
//      fence is read while already "inside"
//    - A fence with a language tag is skipped, a bare one closes
//    - Annotated blocks therefore need a language tag to be checked; untagged
//      ones come out empty and produce no snippet
//
// 2. What is the `deferred` field for?
//    - A new annotation can show up while the previous snippet hasn't been
//      handed out yet
//    - We hand out the earlier snippet first and report the bad annotation on
//      the next call, so problems surface in document order
// -----------------------------------------------------------------------------
