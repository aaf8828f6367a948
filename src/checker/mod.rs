// src/checker/mod.rs
// =============================================================================
// This module contains the link liveness check.
//
// Submodules:
// - markdown: Extracts link targets from markdown text
// - html: Extracts hrefs from raw HTML embedded in markdown
// - http: Makes HTTP requests to check if links are alive
//
// This check is advisory: a dead link is reported, never fatal.
// =============================================================================

mod html;
mod http;
mod markdown;

pub use http::{Liveness, LinkRecord, LivenessProbe};
pub use markdown::{collect_links, AnchorExtractor};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/checker/), the
//      mod.rs file inside it is the module root
//
// 2. Why use 'pub use'?
//    - It re-exports items from submodules
//    - Callers write `checker::LivenessProbe` instead of
//      `checker::http::LivenessProbe`
// -----------------------------------------------------------------------------
