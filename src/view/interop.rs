//! `http` crate request/response types as CORS views.

use std::borrow::Cow;

use http::header::{HeaderMap, HeaderName, HeaderValue, HOST};
use http::{Method, Request, Response, StatusCode};
use tracing::warn;

use super::{RequestView, ResponseView};
use crate::origin::Origin;

fn header_text(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}

/// Every line of `name` joined with `", "`, the way a list header is folded
fn folded_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let mut values = headers.get_all(name).iter();
    let first = header_text(values.next()?);
    let rest: Vec<Cow<'_, str>> = values.map(header_text).collect();
    if rest.is_empty() {
        return Some(first);
    }
    let mut joined = first.into_owned();
    for v in rest {
        joined.push_str(", ");
        joined.push_str(&v);
    }
    Some(Cow::Owned(joined))
}

impl<B> RequestView for Request<B> {
    fn method(&self) -> &Method {
        Request::method(self)
    }

    /// Only the first line counts; non-text bytes are decoded lossily so the
    /// header is still seen as present.
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers().get(name).map(header_text)
    }

    /// Absolute-form URIs carry their own authority; otherwise the `Host`
    /// header is used and the scheme defaults to `http`.
    fn effective_origin(&self) -> Option<Origin> {
        let scheme = self.uri().scheme_str().unwrap_or("http");
        let authority = match self.uri().authority() {
            Some(a) => a.as_str(),
            None => self.headers().get(HOST)?.to_str().ok()?,
        };
        Origin::from_authority(scheme, authority).ok()
    }
}

impl<B: Default> ResponseView for Response<B> {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        folded_header(self.headers(), name)
    }

    fn set_header(&mut self, name: &'static str, value: String) {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                warn!(header = name, "CORS: refusing to set invalid header name");
                return;
            }
        };
        match HeaderValue::try_from(value) {
            Ok(v) => {
                self.headers_mut().insert(name, v);
            }
            Err(_) => warn!(header = %name, "CORS: refusing to set invalid header value"),
        }
    }

    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn clear_body(&mut self) {
        *self.body_mut() = B::default();
    }
}
