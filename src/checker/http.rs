// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes one GET request per URL with a short (2 second) timeout
// - Only an exact 200 OK counts as alive, after following redirects
// - Timeouts, DNS failures, TLS errors and other statuses count as dead
// - Targets that aren't http(s) URLs are reported as local, never requested
//
// Links are probed one at a time, in the order they were found.
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent different link states
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

// What we learned about a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    /// Answered 200 OK
    Live,
    /// Any other status, or no answer at all
    Dead,
    /// Relative path, anchor, mailto: etc. Not probed.
    Local,
}

// The result of checking a single link
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    /// The link target, exactly as found in the markdown
    pub url: String,
    pub liveness: Liveness,
    /// Why a dead link is dead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LinkRecord {
    pub fn is_live(&self) -> bool {
        self.liveness == Liveness::Live
    }
}

pub struct LivenessProbe {
    client: Client,
}

impl LivenessProbe {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client })
    }

    // Checks a single link
    //
    // Never fails: every problem ends up in the returned record
    pub async fn probe(&self, url: String) -> LinkRecord {
        if !is_http_link(&url) {
            return LinkRecord {
                url,
                liveness: Liveness::Local,
                message: None,
            };
        }

        let record = match self.client.get(&url).send().await {
            Ok(response) => analyze_response(url, response.status()),
            Err(e) => categorize_error(url, e),
        };

        debug!(url = %record.url, liveness = ?record.liveness, "probed link");
        record
    }
}

// Only an exact 200 is alive. Redirects were already followed by the client.
fn analyze_response(url: String, status_code: StatusCode) -> LinkRecord {
    if status_code == StatusCode::OK {
        LinkRecord {
            url,
            liveness: Liveness::Live,
            message: None,
        }
    } else {
        LinkRecord {
            url,
            liveness: Liveness::Dead,
            message: Some(format!("HTTP {}", status_code)),
        }
    }
}

// Turns a reqwest error into a dead record with a readable reason
fn categorize_error(url: String, error: reqwest::Error) -> LinkRecord {
    let error_string = error.to_string();

    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    };

    LinkRecord {
        url,
        liveness: Liveness::Dead,
        message: Some(message),
    }
}

fn is_http_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
