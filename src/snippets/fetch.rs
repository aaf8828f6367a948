// src/snippets/fetch.rs
// =============================================================================
// This module downloads the remote files that snippets point at.
//
// One GET per annotation, every time: no cache, no retries. Whatever body the
// server sends back is used as the reference text, even for an error status.
// A wrong body simply won't match the local code block.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
}

impl RemoteFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client })
    }

    // Fetches the full text of `url`
    //
    // Errors: only transport failures (DNS, refused connection, timeout)
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {}", url))?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched reference");
        Ok(body)
    }
}
