// src/test_server.rs
// =============================================================================
// A tiny HTTP server on 127.0.0.1 for tests, built on axum.
//
// Each route in the table answers with a fixed reply. Every request that
// reaches the router (including unknown paths, which get a 404) bumps a
// shared counter, so tests can check that a fetch did (or did not) happen.
//
// Unit tests use it directly; tests/common pulls this same file in.
// =============================================================================

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Hits = Arc<AtomicUsize>;

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(StatusCode, String),
    /// 308 Permanent Redirect with a Location header
    MovedTo(String),
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Text(StatusCode::OK, body.to_string())
    }

    pub fn status(code: u16, body: &str) -> Self {
        let code = StatusCode::from_u16(code).expect("valid status code");
        Reply::Text(code, body.to_string())
    }

    pub fn redirect(to: &str) -> Self {
        Reply::MovedTo(to.to_string())
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Text(status, body) => (status, body).into_response(),
            Reply::MovedTo(location) => Redirect::permanent(&location).into_response(),
        }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    hits: Hits,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(routes: Vec<(&str, Reply)>) -> Self {
        let hits: Hits = Arc::new(AtomicUsize::new(0));

        let mut app = Router::new();
        for (path, reply) in routes {
            app = app.route(
                path,
                get(move |State(hits): State<Hits>| {
                    let reply = reply.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        reply
                    }
                }),
            );
        }
        let app = app
            .fallback(|State(hits): State<Hits>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, "404: Not Found")
            })
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self { addr, hits, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// A URL on a port nobody is listening on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/gone", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_answer_with_their_status_and_reason() {
        let server = TestServer::start(vec![
            ("/boom", Reply::status(500, "x")),
            ("/old", Reply::redirect("/new")),
        ])
        .await;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let boom = client.get(server.url("/boom")).send().await.unwrap();
        assert_eq!(boom.status().as_u16(), 500);
        assert_eq!(boom.status().canonical_reason(), Some("Internal Server Error"));

        let old = client.get(server.url("/old")).send().await.unwrap();
        assert_eq!(old.status().as_u16(), 308);
        assert_eq!(old.headers()["location"], "/new");

        let missing = client.get(server.url("/nope")).send().await.unwrap();
        assert_eq!(missing.status().as_u16(), 404);
        assert_eq!(server.hits(), 3);
    }
}
