use http::Method;

use super::CorsOptions;
use crate::error::CorsConfigError;
use crate::pattern::parse_patterns;

/// Builder for creating [`CorsOptions`] with a fluent API
///
/// # Example
///
/// ```rust
/// use brrtcors::CorsOptionsBuilder;
/// use http::Method;
///
/// let options = CorsOptionsBuilder::new()
///     .allowed_origins(&["https://example.com", "https://*.example.com"])
///     .allowed_methods(&[Method::GET, Method::POST, Method::PUT])
///     .allowed_headers(&["Content-Type", "Authorization", "X-Custom-Header"])
///     .allow_credentials(true)
///     .expose_headers(&["X-Total-Count", "X-Page-Number"])
///     .max_age(3600) // Cache preflight for 1 hour
///     .build()
///     .expect("Invalid CORS configuration");
/// assert_eq!(options.allowed_origins.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CorsOptionsBuilder {
    allowed_origins: Vec<String>,
    allowed_headers: Vec<String>,
    allowed_methods: Vec<Method>,
    allow_credentials: bool,
    expose_headers: Vec<String>,
    max_age: Option<u32>,
}

impl CorsOptionsBuilder {
    /// Create a new builder with secure defaults
    ///
    /// Default configuration:
    /// - No origins allowed (empty list)
    /// - Common headers: `["Content-Type", "Authorization"]`
    /// - Common methods: `GET, POST, PUT, DELETE, OPTIONS`
    /// - Credentials: `false`
    /// - Exposed headers: empty
    /// - Max age: `None` (no preflight caching)
    #[must_use]
    pub fn new() -> Self {
        let defaults = CorsOptions::default();
        Self {
            allowed_origins: vec![],
            allowed_headers: defaults.allowed_headers,
            allowed_methods: defaults.allowed_methods,
            allow_credentials: false,
            expose_headers: vec![],
            max_age: None,
        }
    }

    /// Set allowed origin patterns
    ///
    /// Each entry is `*`, an exact origin (`https://example.com:8443`) or a
    /// subdomain wildcard (`*.example.com`, `https://*.example.com`). Patterns
    /// are validated in [`build`](Self::build).
    #[must_use]
    pub fn allowed_origins(mut self, origins: &[&str]) -> Self {
        self.allowed_origins = origins.iter().map(|s| s.to_string()).collect();
        self
    }

    #[must_use]
    pub fn allowed_methods(mut self, methods: &[Method]) -> Self {
        self.allowed_methods = methods.to_vec();
        self
    }

    #[must_use]
    pub fn allowed_headers(mut self, headers: &[&str]) -> Self {
        self.allowed_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Enable or disable `Access-Control-Allow-Credentials: true`
    ///
    /// Safe together with `*`: the matched origin is always echoed, never the
    /// literal wildcard.
    #[must_use]
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Set headers to expose to JavaScript
    ///
    /// These headers will be accessible via JavaScript's `response.headers.get()`.
    #[must_use]
    pub fn expose_headers(mut self, headers: &[&str]) -> Self {
        self.expose_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set preflight cache duration in seconds
    #[must_use]
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Build the options
    ///
    /// # Errors
    ///
    /// Returns `CorsConfigError::InvalidOriginFormat` for the first origin
    /// pattern that does not parse.
    pub fn build(self) -> Result<CorsOptions, CorsConfigError> {
        Ok(CorsOptions {
            allowed_origins: parse_patterns(&self.allowed_origins)?,
            allowed_methods: self.allowed_methods,
            allowed_headers: self.allowed_headers,
            exposed_headers: self.expose_headers,
            max_age: self.max_age,
            allow_credentials: self.allow_credentials,
        })
    }
}

impl Default for CorsOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::AllowPattern;

    #[test]
    fn test_builder_defaults_are_secure() {
        let options = CorsOptionsBuilder::new().build().unwrap();
        assert!(options.allowed_origins.is_empty());
        assert!(!options.allow_credentials);
        assert_eq!(options, CorsOptions::default());
    }

    #[test]
    fn test_builder_parses_patterns_in_order() {
        let options = CorsOptionsBuilder::new()
            .allowed_origins(&["*.example.com", "*"])
            .build()
            .unwrap();
        assert!(matches!(
            options.allowed_origins[0],
            AllowPattern::SubdomainWildcard { .. }
        ));
        assert_eq!(options.allowed_origins[1], AllowPattern::Any);
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let err = CorsOptionsBuilder::new()
            .allowed_origins(&["https://ok.com", "not an origin"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CorsConfigError::InvalidOriginFormat {
                origin: "not an origin".into()
            }
        );
    }

    #[test]
    fn test_wildcard_with_credentials_is_allowed() {
        let options = CorsOptionsBuilder::new()
            .allowed_origins(&["*"])
            .allow_credentials(true)
            .build();
        assert!(options.is_ok());
    }
}
