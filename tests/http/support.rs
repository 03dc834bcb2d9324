//! Shared test server setup.

use std::sync::Arc;

use movies_api::{http, CorsConfig, InMemoryMovieStore, MovieService};
use serde_json::{json, Value};

/// A running server and a client to talk to it.
pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Bind to port 0 over a freshly seeded store and return the actual address.
pub async fn start_server() -> TestServer {
    let service = Arc::new(MovieService::new(InMemoryMovieStore::seeded().unwrap()));
    let app = http::router(service, &CorsConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

/// A payload that passes full validation.
pub fn new_movie() -> Value {
    json!({
        "title": "Spirited Away",
        "year": 2001,
        "director": "Hayao Miyazaki",
        "duration": 125,
        "rate": 8.6,
        "poster": "https://example.com/spirited-away.jpg",
        "genre": ["Adventure", "Fantasy"]
    })
}

/// Seeded movie used by lookup tests.
pub const SHAWSHANK_ID: &str = "dcdd0fad-a94c-4810-8acc-5f108d3b18c3";
