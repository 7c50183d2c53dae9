use thiserror::Error;

/// CORS configuration error
///
/// Returned when building [`CorsOptions`](crate::CorsOptions) from a builder,
/// a [`CorsConfig`](crate::CorsConfig) record or a route override, and the
/// configuration cannot be turned into typed options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorsConfigError {
    /// An allow pattern is neither `*`, an absolute origin, nor a
    /// `[scheme://]*.domain` subdomain wildcard.
    #[error(
        "CORS configuration error: Invalid origin format '{origin}'. \
        Expected `*`, scheme://host[:port] or [scheme://]*.domain"
    )]
    InvalidOriginFormat {
        /// The invalid pattern string
        origin: String,
    },
    /// A configured method token is not a valid HTTP method.
    #[error("CORS configuration error: Invalid HTTP method '{method}'")]
    InvalidMethod {
        /// The invalid method token
        method: String,
    },
    /// A configuration value has the wrong shape (e.g. a number where a list
    /// of strings was expected).
    #[error("CORS configuration error: {reason}")]
    Malformed {
        /// Human readable description of what was wrong
        reason: String,
    },
}

/// Request-time CORS failure
///
/// Preflight denial is not an error; it is answered with
/// `Access-Control-Allow-Origin: null` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorsError {
    /// The `Origin` header is not an absolute `scheme://host[:port]` origin.
    #[error("invalid Origin header '{origin}'")]
    InvalidOrigin {
        /// The raw header value
        origin: String,
    },
    /// An actual cross-origin request came from an origin no allow pattern matches.
    #[error("origin '{origin}' is not allowed")]
    DisallowedOrigin {
        /// The rejected origin
        origin: String,
    },
    /// The route-scoped override attached to the matched route is unusable.
    #[error("invalid route CORS override: {0}")]
    InvalidRouteOverride(#[from] CorsConfigError),
}
