//! Origin allow-list.
//!
//! Requests from a listed origin get it echoed back in
//! `Access-Control-Allow-Origin`; requests without an `Origin` header
//! (non-browser clients) pass untouched; any other origin gets no
//! allow-origin header, which makes the browser block the response. Every
//! `OPTIONS` request is answered directly as a preflight; allowed methods
//! and headers are only advertised to origins that were let through.

use std::time::Duration;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Methods advertised to preflight requests.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer from configuration.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(config)))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age_seconds))
}

/// Drop the preflight grants tower-http adds to every `OPTIONS` response when
/// the request named an origin that was not allowed.
///
/// Must wrap the [`cors_layer`] so it sees the headers that layer set.
pub async fn preflight_gate(request: Request, next: Next) -> Response {
    let has_origin = request.headers().contains_key(header::ORIGIN);
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    if has_origin && !headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        headers.remove(header::ACCESS_CONTROL_ALLOW_METHODS);
        headers.remove(header::ACCESS_CONTROL_ALLOW_HEADERS);
        headers.remove(header::ACCESS_CONTROL_MAX_AGE);
    }
    response
}

fn parse_origins(config: &CorsConfig) -> Vec<HeaderValue> {
    let mut allowed = Vec::new();
    for origin in &config.allowed_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => allowed.push(value),
            Err(_) => {
                tracing::error!(origin = %origin, "invalid CORS origin; skipping");
            }
        }
    }
    allowed
}
