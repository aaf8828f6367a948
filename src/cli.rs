// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one subcommand per check:
// - links:    find every link in the markdown files and probe the web ones
// - snippets: make sure annotated code blocks still match their remote source
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Directory skipped by the snippet checker unless --exclude says otherwise.
// It holds CI tooling, not documentation.
pub const DEFAULT_EXCLUDE: &str = ".github";

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "docs-guardian",
    version = "0.1.0",
    about = "Checks markdown docs for dead links and stale code snippets",
    long_about = "docs-guardian walks a directory of markdown files. It can report which links \
                  are still reachable, and it can verify that code blocks annotated with a remote \
                  line range (<!-- https://host/file#L10-L20 -->) still match that source verbatim."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which links in the markdown files are alive
    ///
    /// Live links go to stdout, dead ones to stderr. Always exits 0.
    ///
    /// Example: docs-guardian links ./docs
    Links {
        /// Directory to scan recursively for .md files
        root: PathBuf,

        /// Print the results as a JSON array instead of one URL per line
        #[arg(long)]
        json: bool,
    },

    /// Verify annotated code blocks against their remote source
    ///
    /// Stops at the first mismatch and exits 1.
    ///
    /// Example: docs-guardian snippets ./book
    Snippets {
        /// Directory to scan recursively for .md files
        root: PathBuf,

        /// Directory (relative to ROOT) whose markdown files are skipped.
        /// Can be given more than once.
        #[arg(long = "exclude", value_name = "DIR", default_value = DEFAULT_EXCLUDE)]
        excludes: Vec<PathBuf>,
    },
}
