//! Request and response capability views
//!
//! The decision engine never touches a framework's concrete request or response
//! type. It only needs header lookup, the request method and the request's own
//! origin on the way in, and header get/set, status and body reset on the way out.
//! [`HttpRequest`]/[`HttpResponse`] are small header-vector messages for hosts
//! without their own types; `http::Request<B>` and `http::Response<B>` implement
//! the views directly.

mod interop;
mod message;

pub use message::{HeaderVec, HttpRequest, HttpResponse, MAX_INLINE_HEADERS};

use std::borrow::Cow;

use http::{Method, StatusCode};

use crate::origin::Origin;

/// Read-only view of an incoming request
pub trait RequestView {
    /// HTTP method of the request
    fn method(&self) -> &Method;

    /// Get a header by name (case-insensitive per RFC 7230)
    ///
    /// A header that is present but not valid text is still returned (lossily
    /// decoded), so a garbled `Origin` is rejected rather than ignored.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// The request's own effective origin (scheme, host and port it was sent to)
    ///
    /// `None` when the host cannot be determined; any `Origin` is then treated as
    /// cross-origin.
    fn effective_origin(&self) -> Option<Origin>;
}

/// Mutable view of an outgoing response
pub trait ResponseView {
    /// Get a header by name (case-insensitive)
    ///
    /// Repeated header lines are joined with `", "` into one list value.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Add or replace a header; any existing header with the same name
    /// (case-insensitive) is removed first
    fn set_header(&mut self, name: &'static str, value: String);

    fn set_status(&mut self, status: StatusCode);

    /// Drop any body so the response is empty
    fn clear_body(&mut self);
}
