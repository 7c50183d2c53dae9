//! Request classification: cross-origin or not, preflight or actual.

use http::Method;
use tracing::debug;

use crate::error::CorsError;
use crate::origin::Origin;
use crate::view::RequestView;

/// `Origin` request header
pub const ORIGIN: &str = "Origin";
/// `Access-Control-Request-Method` request header (preflight indicator)
pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";

/// How a request takes part in CORS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// No `Origin` header, or same-origin; no CORS handling needed
    NotCors,
    /// Cross-origin `OPTIONS` carrying `Access-Control-Request-Method`
    Preflight,
    /// Any other cross-origin request
    Actual,
}

/// Parse the request's `Origin` header, if present.
///
/// # Errors
///
/// [`CorsError::InvalidOrigin`] if the header is present but is not an absolute
/// `scheme://host[:port]` origin.
pub fn request_origin<R: RequestView + ?Sized>(req: &R) -> Result<Option<Origin>, CorsError> {
    req.header(ORIGIN).map(|v| Origin::parse(&v)).transpose()
}

/// True iff the request carries an `Origin` that differs from the request's own
/// scheme, host or port.
///
/// A request whose own origin cannot be determined (no `Host`) is treated as
/// cross-origin.
pub fn is_cors_request<R: RequestView + ?Sized>(req: &R) -> Result<bool, CorsError> {
    let Some(origin) = request_origin(req)? else {
        return Ok(false);
    };
    match req.effective_origin() {
        Some(own) if own == origin => {
            debug!(origin = %origin, "CORS: same-origin request");
            Ok(false)
        }
        _ => Ok(true),
    }
}

/// True iff method is `OPTIONS` and both `Origin` and
/// `Access-Control-Request-Method` are present.
#[must_use]
pub fn is_preflight_request<R: RequestView + ?Sized>(req: &R) -> bool {
    req.method() == Method::OPTIONS
        && req.header(ORIGIN).is_some()
        && req.header(ACCESS_CONTROL_REQUEST_METHOD).is_some()
}

/// Classify a request as non-CORS, preflight or actual cross-origin.
pub fn classify_request<R: RequestView + ?Sized>(req: &R) -> Result<RequestKind, CorsError> {
    if !is_cors_request(req)? {
        return Ok(RequestKind::NotCors);
    }
    if is_preflight_request(req) {
        Ok(RequestKind::Preflight)
    } else {
        Ok(RequestKind::Actual)
    }
}
