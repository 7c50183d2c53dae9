//! CORS response synthesis: preflight answers, actual-response headers and `Vary`.

use http::StatusCode;
use tracing::{debug, warn};

use crate::classify::request_origin;
use crate::error::CorsError;
use crate::options::CorsOptions;
use crate::pattern::match_origin;
use crate::view::{RequestView, ResponseView};

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
pub const VARY: &str = "Vary";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// `Access-Control-Allow-Origin` value for a denied preflight
pub const DENIED_ORIGIN: &str = "null";

/// Build the answer to a preflight request
///
/// Always a well-formed `200` with an empty body and `Content-Length: 0`. An
/// origin no pattern matches (or a missing/unparsable one) gets
/// `Access-Control-Allow-Origin: null` so the browser's own check fails closed;
/// this never errors.
///
/// Headers set:
/// - `Access-Control-Allow-Origin`: the requester's origin, or `null`
/// - `Access-Control-Allow-Methods` / `Access-Control-Allow-Headers`: the
///   configured lists joined with `", "`, in configured order
/// - `Access-Control-Max-Age`: when configured
/// - `Access-Control-Allow-Credentials: true`: only for a matched origin with
///   credentials enabled
/// - `Vary: Origin`: unless the only pattern is `*`
pub fn build_preflight_response<Req, Res>(req: &Req, options: &CorsOptions) -> Res
where
    Req: RequestView + ?Sized,
    Res: ResponseView + Default,
{
    let origin = request_origin(req).unwrap_or_else(|e| {
        warn!(error = %e, "CORS preflight: unparsable Origin treated as denied");
        None
    });
    let matched = origin
        .as_ref()
        .and_then(|o| match_origin(o, &options.allowed_origins));

    let mut res = Res::default();
    res.set_status(StatusCode::OK);
    res.clear_body();
    res.set_header(CONTENT_LENGTH, "0".to_string());

    match matched {
        Some(allowed) => res.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, allowed.to_string()),
        None => {
            warn!(
                origin = origin.as_ref().map_or("", |o| o.as_str()),
                "CORS preflight: origin not allowed"
            );
            res.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, DENIED_ORIGIN.to_string());
        }
    }

    let methods = options
        .allowed_methods
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    res.set_header(ACCESS_CONTROL_ALLOW_METHODS, methods);
    res.set_header(ACCESS_CONTROL_ALLOW_HEADERS, options.allowed_headers.join(", "));

    if let Some(age) = options.max_age {
        res.set_header(ACCESS_CONTROL_MAX_AGE, age.to_string());
    }

    if options.allow_credentials && matched.is_some() {
        res.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
    }

    ensure_vary_header(&mut res, options);
    res
}

/// Add CORS headers to the response of an actual cross-origin request
///
/// A request without an `Origin` header is left untouched.
///
/// # Errors
///
/// - [`CorsError::InvalidOrigin`] if the `Origin` header does not parse
/// - [`CorsError::DisallowedOrigin`] if no allow pattern matches; unlike a
///   preflight, the actual exchange fails loudly
pub fn populate_cors_response<Req, Res>(
    req: &Req,
    res: &mut Res,
    options: &CorsOptions,
) -> Result<(), CorsError>
where
    Req: RequestView + ?Sized,
    Res: ResponseView + ?Sized,
{
    let Some(origin) = request_origin(req)? else {
        debug!("CORS: no Origin header, skipping CORS headers");
        return Ok(());
    };

    let Some(allowed) = match_origin(&origin, &options.allowed_origins) else {
        warn!(origin = %origin, "CORS: origin not allowed");
        return Err(CorsError::DisallowedOrigin {
            origin: origin.as_str().to_string(),
        });
    };

    // Only one origin per response, never the literal "*"
    res.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, allowed.to_string());

    if !options.exposed_headers.is_empty() {
        res.set_header(
            ACCESS_CONTROL_EXPOSE_HEADERS,
            options.exposed_headers.join(", "),
        );
    }

    if options.allow_credentials {
        res.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
    }

    ensure_vary_header(res, options);
    Ok(())
}

/// Make sure caches key the response on `Origin`
///
/// - Only pattern is `*`: nothing to do, the response does not vary by origin
/// - No `Vary`: set `Vary: Origin`
/// - Existing `Vary`: append `, Origin`, keeping existing tokens in order,
///   unless it already lists `Origin` or is `*`
pub fn ensure_vary_header<Res>(res: &mut Res, options: &CorsOptions)
where
    Res: ResponseView + ?Sized,
{
    if options.is_wildcard_only() {
        return;
    }

    let value = match res.header(VARY) {
        None => "Origin".to_string(),
        Some(existing) => {
            let already_varies = existing
                .split(',')
                .map(str::trim)
                .any(|t| t == "*" || t.eq_ignore_ascii_case("origin"));
            if already_varies {
                return;
            }
            let existing = existing.trim().trim_end_matches(',').trim_end();
            if existing.is_empty() {
                "Origin".to_string()
            } else {
                format!("{}, Origin", existing)
            }
        }
    };
    res.set_header(VARY, value);
}
