#![allow(dead_code)]

use brrtcors::{HeaderVec, HttpRequest, HttpResponse};
use http::Method;

/// Install a test-writer fmt subscriber once so `tracing` output shows up
/// alongside failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Request served at `http://api.local:8080` carrying the given headers
pub fn create_test_request(method: Method, headers: &[(&str, &str)]) -> HttpRequest {
    headers.iter().fold(
        HttpRequest::new(method, HeaderVec::new()).with_header("Host", "api.local:8080"),
        |req, (name, value)| req.with_header(name, value),
    )
}

/// Cross-origin preflight from `origin`
pub fn create_preflight_request(origin: &str) -> HttpRequest {
    create_test_request(
        Method::OPTIONS,
        &[
            ("Origin", origin),
            ("Access-Control-Request-Method", "POST"),
        ],
    )
}

/// Cross-origin GET from `origin`
pub fn create_actual_request(origin: &str) -> HttpRequest {
    create_test_request(Method::GET, &[("Origin", origin)])
}

pub fn create_test_response(status: u16) -> HttpResponse {
    HttpResponse::new(status, HeaderVec::new()).with_body("{\"ok\":true}")
}
