//! Resolved CORS options and the global/route options merge.

mod builder;
mod route_config;

pub use builder::CorsOptionsBuilder;
pub use route_config::{
    extract_route_cors_config, RouteCorsConfig, RouteMatch, RouteMetadata, ROUTE_CORS_KEY,
};

use std::borrow::Cow;

use http::Method;

use crate::config::CorsConfig;
use crate::error::CorsConfigError;
use crate::pattern::AllowPattern;

/// Resolved, per-request immutable CORS options
///
/// Built once at startup (from [`CorsOptionsBuilder`] or a [`CorsConfig`]) and
/// shared read-only across requests. Route overrides never mutate it; they are
/// merged into a fresh record by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsOptions {
    /// Allow patterns, tried in order
    pub allowed_origins: Vec<AllowPattern>,
    /// Methods advertised in `Access-Control-Allow-Methods`
    pub allowed_methods: Vec<Method>,
    /// Headers advertised in `Access-Control-Allow-Headers`
    pub allowed_headers: Vec<String>,
    /// Headers advertised in `Access-Control-Expose-Headers`
    pub exposed_headers: Vec<String>,
    /// Preflight cache duration in seconds
    pub max_age: Option<u32>,
    /// Whether `Access-Control-Allow-Credentials: true` is sent for matched origins
    pub allow_credentials: bool,
}

impl CorsOptions {
    #[must_use]
    pub fn builder() -> CorsOptionsBuilder {
        CorsOptionsBuilder::new()
    }

    /// Allow every origin, for development and testing only.
    ///
    /// The matched origin is still echoed individually, so this stays valid
    /// even if credentials are switched on later.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec![AllowPattern::Any],
            ..Self::default()
        }
    }

    /// True when the only configured pattern is `*`; responses then do not vary
    /// by origin.
    #[must_use]
    pub fn is_wildcard_only(&self) -> bool {
        matches!(self.allowed_origins.as_slice(), [AllowPattern::Any])
    }

    /// Shallow-merge a route override over these options into a new record.
    #[must_use]
    pub fn merged_with(&self, route: &RouteCorsConfig) -> CorsOptions {
        CorsOptions {
            allowed_origins: route
                .allowed_origins
                .clone()
                .unwrap_or_else(|| self.allowed_origins.clone()),
            allowed_methods: route
                .allowed_methods
                .clone()
                .unwrap_or_else(|| self.allowed_methods.clone()),
            allowed_headers: route
                .allowed_headers
                .clone()
                .unwrap_or_else(|| self.allowed_headers.clone()),
            exposed_headers: route
                .exposed_headers
                .clone()
                .unwrap_or_else(|| self.exposed_headers.clone()),
            max_age: route.max_age.or(self.max_age),
            allow_credentials: route.allow_credentials.unwrap_or(self.allow_credentials),
        }
    }
}

/// Secure defaults: no origins allowed until configured.
impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allowed_headers: vec!["Content-Type".into(), "Authorization".into()],
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ],
            exposed_headers: vec![],
            max_age: None,
            allow_credentials: false,
        }
    }
}

/// Keys missing from the config record keep the secure defaults.
impl TryFrom<CorsConfig> for CorsOptions {
    type Error = CorsConfigError;

    fn try_from(config: CorsConfig) -> Result<Self, Self::Error> {
        let overrides = RouteCorsConfig::try_from(config)?;
        Ok(CorsOptions::default().merged_with(&overrides))
    }
}

/// Produce the effective options for one request.
///
/// Without a route override the global options are returned as-is (borrowed);
/// otherwise every key the override supplies replaces the global value and the
/// rest fall back to global. Sequences are replaced, never appended.
#[must_use]
pub fn resolve<'a>(global: &'a CorsOptions, route: Option<&RouteCorsConfig>) -> Cow<'a, CorsOptions> {
    match route {
        None => Cow::Borrowed(global),
        Some(overrides) => Cow::Owned(global.merged_with(overrides)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_patterns;

    fn global() -> CorsOptions {
        CorsOptions {
            allowed_origins: parse_patterns(&["https://a.com"]).unwrap(),
            allowed_methods: vec![Method::GET, Method::POST],
            allowed_headers: vec!["X-Global".into()],
            exposed_headers: vec!["X-Total-Count".into()],
            max_age: Some(600),
            allow_credentials: true,
        }
    }

    #[test]
    fn test_resolve_without_override_borrows_global() {
        let g = global();
        let effective = resolve(&g, None);
        assert!(matches!(effective, Cow::Borrowed(_)));
        assert_eq!(*effective, g);
    }

    #[test]
    fn test_resolve_replaces_only_supplied_keys() {
        let g = global();
        let route = RouteCorsConfig {
            allowed_origins: Some(parse_patterns(&["*.b.com"]).unwrap()),
            ..RouteCorsConfig::default()
        };
        let effective = resolve(&g, Some(&route));
        assert_eq!(effective.allowed_origins, parse_patterns(&["*.b.com"]).unwrap());
        assert_eq!(effective.allowed_methods, g.allowed_methods);
        assert_eq!(effective.max_age, Some(600));
        assert!(effective.allow_credentials);
        // global untouched
        assert_eq!(g.allowed_origins, parse_patterns(&["https://a.com"]).unwrap());
    }

    #[test]
    fn test_resolve_replaces_sequences_wholesale() {
        let g = global();
        let route = RouteCorsConfig {
            allowed_headers: Some(vec!["X-Route".into()]),
            allow_credentials: Some(false),
            ..RouteCorsConfig::default()
        };
        let effective = resolve(&g, Some(&route));
        assert_eq!(effective.allowed_headers, vec!["X-Route".to_string()]);
        assert!(!effective.allow_credentials);
    }

    #[test]
    fn test_wildcard_only_detection() {
        assert!(CorsOptions::permissive().is_wildcard_only());
        assert!(!CorsOptions::default().is_wildcard_only());
        let mixed = CorsOptions {
            allowed_origins: parse_patterns(&["*", "https://a.com"]).unwrap(),
            ..CorsOptions::default()
        };
        assert!(!mixed.is_wildcard_only());
    }
}
