//! Common test utilities.

#![allow(dead_code)]

use std::process::Command;
use std::sync::mpsc;
use std::thread;

#[path = "../../src/test_server.rs"]
mod test_server;

pub use test_server::Reply;
use test_server::{unreachable_url, TestServer};

pub fn guardian_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docs-guardian"))
}

/// Serves `routes` on 127.0.0.1 for the rest of the test process.
/// Returns the base URL, e.g. `http://127.0.0.1:4567`.
pub fn serve(routes: Vec<(&'static str, Reply)>) -> String {
    let (tx, rx) = mpsc::channel();

    // The server lives on its own runtime so the tests can stay synchronous
    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let server = TestServer::start(routes).await;
            tx.send(server.url("")).expect("send server url");
            std::future::pending::<()>().await;
        });
    });

    rx.recv().expect("server url")
}

/// A URL on a loopback port nobody is listening on.
pub fn unreachable() -> String {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    runtime.block_on(unreachable_url())
}
