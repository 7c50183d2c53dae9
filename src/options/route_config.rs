use std::collections::HashMap;

use http::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::config::CorsConfig;
use crate::error::CorsConfigError;
use crate::pattern::{parse_patterns, AllowPattern};

/// Reserved route-metadata key carrying a route's CORS override
pub const ROUTE_CORS_KEY: &str = "x-cors";

/// Route-specific CORS override
///
/// Every field is optional: a supplied field replaces the global value, a
/// missing one falls back to it (see [`resolve`](super::resolve)).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCorsConfig {
    pub allowed_origins: Option<Vec<AllowPattern>>,
    pub allowed_methods: Option<Vec<Method>>,
    pub allowed_headers: Option<Vec<String>>,
    pub exposed_headers: Option<Vec<String>>,
    pub max_age: Option<u32>,
    pub allow_credentials: Option<bool>,
}

impl TryFrom<CorsConfig> for RouteCorsConfig {
    type Error = CorsConfigError;

    fn try_from(config: CorsConfig) -> Result<Self, Self::Error> {
        let allowed_origins = config
            .allowed_origins
            .as_deref()
            .map(parse_patterns)
            .transpose()?;

        let allowed_methods = config
            .allowed_methods
            .map(|methods| {
                methods
                    .iter()
                    .map(|m| {
                        m.trim()
                            .to_ascii_uppercase()
                            .parse::<Method>()
                            .map_err(|_| CorsConfigError::InvalidMethod { method: m.clone() })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            allowed_origins,
            allowed_methods,
            allowed_headers: config.allowed_headers,
            exposed_headers: config.exposed_headers,
            max_age: config.max_age,
            allow_credentials: config.allowed_credentials,
        })
    }
}

/// Lookup into the metadata the routing layer attached to a matched route
pub trait RouteMetadata {
    fn route_option(&self, key: &str) -> Option<&Value>;

    /// Name used to identify the route in logs
    fn route_name(&self) -> Option<&str> {
        None
    }
}

impl RouteMetadata for HashMap<String, Value> {
    fn route_option(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl RouteMetadata for serde_json::Map<String, Value> {
    fn route_option(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// A matched route as seen by the CORS engine: its handler name and metadata
#[derive(Debug, Clone, Default)]
pub struct RouteMatch {
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Route metadata (OpenAPI extensions, route parameters)
    pub metadata: HashMap<String, Value>,
}

impl RouteMatch {
    #[must_use]
    pub fn new(handler_name: &str) -> Self {
        Self {
            handler_name: handler_name.to_string(),
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Attach a CORS override under [`ROUTE_CORS_KEY`]
    #[must_use]
    pub fn with_cors(self, value: Value) -> Self {
        self.with_metadata(ROUTE_CORS_KEY, value)
    }
}

impl RouteMetadata for RouteMatch {
    fn route_option(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    fn route_name(&self) -> Option<&str> {
        Some(&self.handler_name)
    }
}

/// Extract a route's CORS override from its metadata
///
/// Supports:
/// - Object: `x-cors: { allowed_origins: [...], allowCredentials: true }` → `Some(config)`
/// - String: `x-cors: "inherit"` → `None` (uses global config)
/// - Missing / `null` → `None`
///
/// Keys follow [`CorsConfig`]; unknown keys are ignored.
///
/// # Errors
///
/// `CorsConfigError::Malformed` for any other shape or a mistyped value, and the
/// pattern/method errors of [`RouteCorsConfig::try_from`].
pub fn extract_route_cors_config<M: RouteMetadata + ?Sized>(
    route: &M,
) -> Result<Option<RouteCorsConfig>, CorsConfigError> {
    match route.route_option(ROUTE_CORS_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s == "inherit" => Ok(None),
        Some(value @ Value::Object(_)) => {
            let config = CorsConfig::deserialize(value).map_err(|e| CorsConfigError::Malformed {
                reason: format!("`{}`: {}", ROUTE_CORS_KEY, e),
            })?;
            RouteCorsConfig::try_from(config).map(Some)
        }
        Some(other) => Err(CorsConfigError::Malformed {
            reason: format!(
                "`{}` must be an object or \"inherit\", got {}",
                ROUTE_CORS_KEY, other
            ),
        }),
    }
}
