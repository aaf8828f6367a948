// src/files/mod.rs
// =============================================================================
// This module finds the markdown files we are going to check.
//
// Both checks (links and snippets) start from a root directory given on the
// command line and need the list of `.md` files underneath it.
// =============================================================================

mod collect;

pub use collect::collect_markdown_files;
