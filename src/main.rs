// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up diagnostic logging (RUST_LOG, printed to stderr)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code
//
// Exit codes:
//   links:    0, or 2 if the directory can't be read
//   snippets: 0 = all snippets match, 1 = mismatch or malformed annotation
//             (both reported on stdout),
//             2 = any other error (unreadable file, download failure)
// =============================================================================

mod checker; // src/checker/ - link liveness check
mod cli; // src/cli.rs - command-line parsing
mod files; // src/files/ - markdown file discovery
mod snippets; // src/snippets/ - code snippet verification

#[cfg(test)]
mod test_server;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr. Quiet unless RUST_LOG asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Links { root, json } => handle_links(&root, json).await,
        Commands::Snippets { root, excludes } => handle_snippets(&root, &excludes).await,
    }
}

// Handles the 'links' subcommand
//
// Live links -> stdout, dead links (and why) -> stderr,
// local references -> stdout with a "local reference:" prefix
async fn handle_links(root: &Path, json: bool) -> Result<i32> {
    let markdown_files = files::collect_markdown_files(root, &[])?;

    let extractor = checker::AnchorExtractor::new()?;
    let links = checker::collect_links(&extractor, &markdown_files)?;

    let probe = checker::LivenessProbe::new()?;
    let mut records = Vec::with_capacity(links.len());
    for url in links {
        let record = probe.probe(url).await;
        if !json {
            print_record(&record);
        }
        records.push(record);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    // Dead links are advisory only
    Ok(0)
}

fn print_record(record: &checker::LinkRecord) {
    if record.is_live() {
        println!("{}", record.url);
        return;
    }

    match record.liveness {
        checker::Liveness::Local => println!("local reference: {}", record.url),
        _ => {
            if let Some(message) = &record.message {
                eprintln!("{}", message);
            }
            eprintln!("{}", record.url);
        }
    }
}

// Handles the 'snippets' subcommand
async fn handle_snippets(root: &Path, excludes: &[PathBuf]) -> Result<i32> {
    let checker = snippets::SnippetChecker::new()?;

    match checker.check_tree(root, excludes).await {
        Ok(snippets::Outcome::Verified) => Ok(0),
        Ok(snippets::Outcome::Mismatch(mismatch)) => {
            println!("{}", mismatch);
            Ok(1)
        }
        Err(e) => match e.downcast_ref::<snippets::MalformedAnnotation>() {
            // Reported on stdout next to mismatch reports
            Some(malformed) => {
                println!("Error: {}", malformed);
                Ok(1)
            }
            None => Err(e),
        },
    }
}
