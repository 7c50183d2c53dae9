use std::borrow::Cow;
use std::sync::Arc;

use http::{Method, StatusCode};
use smallvec::SmallVec;

use super::{RequestView, ResponseView};
use crate::origin::Origin;

/// Maximum inline headers before heap allocation
/// Most requests have ≤16 headers
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage
///
/// Header names use `Arc<str>` so the static CORS header names are shared
/// instead of copied for every response.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

fn find_header<'a>(headers: &'a HeaderVec, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// All values of a repeated header joined into one list value
fn joined_header<'a>(headers: &'a HeaderVec, name: &str) -> Option<Cow<'a, str>> {
    let mut values = headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str());
    let first = values.next()?;
    match values.next() {
        None => Some(Cow::Borrowed(first)),
        Some(second) => {
            let mut joined = format!("{}, {}", first, second);
            for v in values {
                joined.push_str(", ");
                joined.push_str(v);
            }
            Some(Cow::Owned(joined))
        }
    }
}

/// Minimal request message for hosts without an `http::Request`
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, OPTIONS, etc.)
    pub method: Method,
    /// Scheme the request arrived on (`http` or `https`)
    pub scheme: String,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
}

impl HttpRequest {
    /// Create a plain `http` request with the given headers
    #[must_use]
    pub fn new(method: Method, headers: HeaderVec) -> Self {
        Self {
            method,
            scheme: "http".to_string(),
            headers,
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_ascii_lowercase();
        self
    }

    /// Append a header, keeping any existing values
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((Arc::from(name), value.to_string()));
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

impl RequestView for HttpRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get_header(name).map(Cow::Borrowed)
    }

    fn effective_origin(&self) -> Option<Origin> {
        let host = self.get_header("host")?;
        Origin::from_authority(&self.scheme, host).ok()
    }
}

/// Minimal response message
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new response with the given status and headers and no body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec) -> Self {
        Self {
            status,
            headers,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new(200, HeaderVec::new())
    }
}

impl ResponseView for HttpResponse {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        joined_header(&self.headers, name)
    }

    fn set_header(&mut self, name: &'static str, value: String) {
        HttpResponse::set_header(self, name, value);
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status.as_u16();
    }

    fn clear_body(&mut self) {
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::new(Method::GET, HeaderVec::new())
            .with_header("Origin", "https://a.com");
        assert_eq!(req.get_header("origin"), Some("https://a.com"));
        assert_eq!(req.get_header("ORIGIN"), Some("https://a.com"));
    }

    #[test]
    fn test_effective_origin_from_host_header() {
        let req = HttpRequest::new(Method::GET, HeaderVec::new())
            .with_scheme("https")
            .with_header("Host", "api.example.com:8443");
        let own = req.effective_origin().unwrap();
        assert_eq!(own, Origin::parse("https://api.example.com:8443").unwrap());

        let no_host = HttpRequest::new(Method::GET, HeaderVec::new());
        assert!(no_host.effective_origin().is_none());
    }

    #[test]
    fn test_set_header_replaces_existing() {
        let mut resp = HttpResponse::default();
        resp.set_header("vary", "Accept".to_string());
        resp.set_header("Vary", "Accept, Origin".to_string());
        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.get_header("VARY"), Some("Accept, Origin"));
    }

    #[test]
    fn test_response_view_joins_repeated_headers() {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("Vary"), "Accept".to_string()));
        headers.push((Arc::from("content-type"), "text/plain".to_string()));
        headers.push((Arc::from("vary"), "Accept-Encoding".to_string()));
        let resp = HttpResponse::new(200, headers);
        assert_eq!(
            ResponseView::header(&resp, "vary").as_deref(),
            Some("Accept, Accept-Encoding")
        );
        assert_eq!(
            ResponseView::header(&resp, "Content-Type").as_deref(),
            Some("text/plain")
        );
        assert!(ResponseView::header(&resp, "etag").is_none());
    }
}
