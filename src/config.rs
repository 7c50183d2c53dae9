//! # CORS Configuration
//!
//! [`CorsConfig`] is the serializable configuration surface of the CORS engine.
//! It is the shape of the global options (however the host loads them) and of a
//! route override placed under the `x-cors` route-metadata key.
//!
//! ## Keys
//!
//! | Key | Type | Aliases |
//! |---|---|---|
//! | `allowed_origins` | list of patterns | `allowedOrigins` |
//! | `allowed_methods` | list of methods | `allowedMethods` |
//! | `allowed_headers` | list of header names | `allowedHeaders` |
//! | `exposed_headers` | list of header names | `exposedHeaders`, `exposeHeaders`, `expose_headers` |
//! | `max_age` | seconds | `maxAge` |
//! | `allowed_credentials` | bool | `allowCredentials`, `allow_credentials` |
//!
//! Every key is optional and unknown keys are ignored.
//!
//! ## Environment Variables
//!
//! [`CorsConfig::from_env`] reads:
//!
//! - `BRRTR_CORS_ALLOWED_ORIGINS` - comma-separated patterns, e.g. `https://app.io,*.app.io`
//! - `BRRTR_CORS_ALLOWED_METHODS` - comma-separated methods
//! - `BRRTR_CORS_ALLOWED_HEADERS` - comma-separated header names
//! - `BRRTR_CORS_EXPOSED_HEADERS` - comma-separated header names
//! - `BRRTR_CORS_MAX_AGE` - integer seconds
//! - `BRRTR_CORS_ALLOW_CREDENTIALS` - `true`/`false` (also `1`/`0`, `yes`/`no`)
//!
//! ```bash
//! export BRRTR_CORS_ALLOWED_ORIGINS="https://app.example.com,*.example.com"
//! export BRRTR_CORS_MAX_AGE=3600
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::CorsConfigError;

pub const ENV_ALLOWED_ORIGINS: &str = "BRRTR_CORS_ALLOWED_ORIGINS";
pub const ENV_ALLOWED_METHODS: &str = "BRRTR_CORS_ALLOWED_METHODS";
pub const ENV_ALLOWED_HEADERS: &str = "BRRTR_CORS_ALLOWED_HEADERS";
pub const ENV_EXPOSED_HEADERS: &str = "BRRTR_CORS_EXPOSED_HEADERS";
pub const ENV_MAX_AGE: &str = "BRRTR_CORS_MAX_AGE";
pub const ENV_ALLOW_CREDENTIALS: &str = "BRRTR_CORS_ALLOW_CREDENTIALS";

/// Untyped CORS configuration record
///
/// Convert into [`CorsOptions`](crate::CorsOptions) with `TryFrom`, which
/// validates patterns and methods and fills missing keys with secure defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    #[serde(alias = "allowedOrigins", skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(alias = "allowedMethods", skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(alias = "allowedHeaders", skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
    #[serde(
        alias = "exposedHeaders",
        alias = "exposeHeaders",
        alias = "expose_headers",
        skip_serializing_if = "Option::is_none"
    )]
    pub exposed_headers: Option<Vec<String>>,
    #[serde(alias = "maxAge", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(
        alias = "allowCredentials",
        alias = "allow_credentials",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_credentials: Option<bool>,
}

impl CorsConfig {
    /// Load configuration from `BRRTR_CORS_*` environment variables.
    ///
    /// Unset variables leave the key unset.
    pub fn from_env() -> Result<Self, CorsConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (used by
    /// [`from_env`](Self::from_env)).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CorsConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_age = match lookup(ENV_MAX_AGE) {
            Some(val) => Some(val.trim().parse::<u32>().map_err(|_| {
                CorsConfigError::Malformed {
                    reason: format!("{} must be a non-negative integer, got '{}'", ENV_MAX_AGE, val),
                }
            })?),
            None => None,
        };

        let allowed_credentials = match lookup(ENV_ALLOW_CREDENTIALS) {
            Some(val) => Some(parse_bool(&val).ok_or_else(|| CorsConfigError::Malformed {
                reason: format!("{} must be true or false, got '{}'", ENV_ALLOW_CREDENTIALS, val),
            })?),
            None => None,
        };

        Ok(Self {
            allowed_origins: lookup(ENV_ALLOWED_ORIGINS).map(|v| split_list(&v)),
            allowed_methods: lookup(ENV_ALLOWED_METHODS).map(|v| split_list(&v)),
            allowed_headers: lookup(ENV_ALLOWED_HEADERS).map(|v| split_list(&v)),
            exposed_headers: lookup(ENV_EXPOSED_HEADERS).map(|v| split_list(&v)),
            max_age,
            allowed_credentials,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = CorsConfig::from_lookup(lookup(&[
            (ENV_ALLOWED_ORIGINS, "https://app.io, *.app.io,"),
            (ENV_ALLOWED_METHODS, "GET,POST"),
            (ENV_EXPOSED_HEADERS, "X-Total-Count"),
            (ENV_MAX_AGE, " 3600 "),
            (ENV_ALLOW_CREDENTIALS, "1"),
        ]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            Some(vec!["https://app.io".to_string(), "*.app.io".to_string()])
        );
        assert_eq!(config.allowed_methods, Some(vec!["GET".into(), "POST".into()]));
        assert_eq!(config.allowed_headers, None);
        assert_eq!(config.exposed_headers, Some(vec!["X-Total-Count".into()]));
        assert_eq!(config.max_age, Some(3600));
        assert_eq!(config.allowed_credentials, Some(true));
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = CorsConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CorsConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(CorsConfig::from_lookup(lookup(&[(ENV_MAX_AGE, "-1")])).is_err());
        assert!(CorsConfig::from_lookup(lookup(&[(ENV_ALLOW_CREDENTIALS, "maybe")])).is_err());
    }
}
