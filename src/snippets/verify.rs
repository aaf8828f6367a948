// src/snippets/verify.rs
// =============================================================================
// This module compares a local code block with its remote reference.
//
// The annotation's line range is 1-indexed and inclusive, so `#L5-L8` means
// remote lines 5, 6, 7 and 8. Both sides are compared after trailing
// whitespace is trimmed; everything else must match byte for byte.
// =============================================================================

use super::annotation::SnippetAnnotation;

/// The outcome of comparing one code block with its reference slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Local code block, trailing whitespace trimmed
    pub local: String,
    /// Remote lines in the annotated range, trailing whitespace trimmed
    pub reference: String,
}

impl VerificationResult {
    pub fn passed(&self) -> bool {
        self.local == self.reference
    }
}

// Cuts the annotated line range out of the remote text
//
// Out-of-range lines are simply missing from the slice; a range entirely past
// the end of the file gives an empty slice.
pub fn reference_slice(remote: &str, start_line: usize, end_line: usize) -> String {
    let skip = start_line.saturating_sub(1);
    let take = end_line.saturating_sub(skip);

    let lines: Vec<&str> = remote.lines().skip(skip).take(take).collect();
    lines.join("\n").trim_end().to_string()
}

pub fn verify(code: &str, remote: &str, annotation: &SnippetAnnotation) -> VerificationResult {
    VerificationResult {
        local: code.trim_end().to_string(),
        reference: reference_slice(remote, annotation.start_line, annotation.end_line),
    }
}
