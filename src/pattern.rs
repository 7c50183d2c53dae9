//! Origin allow patterns and the first-match-wins origin matcher.

use std::fmt;
use std::str::FromStr;

use crate::error::CorsConfigError;
use crate::origin::Origin;

/// One configured rule describing which origins are permitted
///
/// Patterns are parsed once when options are built; matching a request never
/// re-parses configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowPattern {
    /// `*` - every origin
    Any,
    /// An exact origin; scheme, host and port must all be identical
    Exact(Origin),
    /// `[scheme://]*.domain.tld` - any strict subdomain of `domain`
    SubdomainWildcard {
        /// Required scheme, if the pattern carried one
        scheme: Option<String>,
        /// Parent domain without the leading `*.`, lowercased
        domain: String,
    },
}

impl AllowPattern {
    /// Parse a configured pattern string.
    pub fn parse(pattern: &str) -> Result<Self, CorsConfigError> {
        let trimmed = pattern.trim();
        let invalid = || CorsConfigError::InvalidOriginFormat {
            origin: pattern.to_string(),
        };

        if trimmed == "*" {
            return Ok(AllowPattern::Any);
        }

        if !trimmed.contains('*') {
            return Origin::parse(trimmed)
                .map(AllowPattern::Exact)
                .map_err(|_| invalid());
        }

        let (scheme, rest) = match trimmed.split_once("://") {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, trimmed),
        };
        if let Some(s) = scheme {
            if s.is_empty()
                || !s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            {
                return Err(invalid());
            }
        }

        let domain = rest.trim_end_matches('/').strip_prefix("*.").ok_or_else(invalid)?;
        let valid_domain = !domain.is_empty()
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains("..")
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'));
        if !valid_domain {
            return Err(invalid());
        }

        Ok(AllowPattern::SubdomainWildcard {
            scheme: scheme.map(|s| s.to_ascii_lowercase()),
            domain: domain.to_ascii_lowercase(),
        })
    }

    /// Check whether `origin` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, origin: &Origin) -> bool {
        match self {
            AllowPattern::Any => true,
            AllowPattern::Exact(allowed) => allowed == origin,
            AllowPattern::SubdomainWildcard { scheme, domain } => {
                if let Some(s) = scheme {
                    if s != origin.scheme() {
                        return false;
                    }
                }
                // At least one label before ".domain"; the bare domain never matches.
                origin
                    .host()
                    .strip_suffix(domain.as_str())
                    .and_then(|prefix| prefix.strip_suffix('.'))
                    .is_some_and(|labels| !labels.is_empty())
            }
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, AllowPattern::Any)
    }
}

impl FromStr for AllowPattern {
    type Err = CorsConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AllowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowPattern::Any => f.write_str("*"),
            AllowPattern::Exact(origin) => write!(f, "{}", origin),
            AllowPattern::SubdomainWildcard {
                scheme: Some(scheme),
                domain,
            } => write!(f, "{}://*.{}", scheme, domain),
            AllowPattern::SubdomainWildcard {
                scheme: None,
                domain,
            } => write!(f, "*.{}", domain),
        }
    }
}

/// Parse a list of pattern strings, failing on the first invalid one.
pub fn parse_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<AllowPattern>, CorsConfigError> {
    patterns.iter().map(|p| AllowPattern::parse(p.as_ref())).collect()
}

/// Match a requester origin against the configured patterns
///
/// Patterns are tried in configured order and the first match wins. On a match
/// the requester's own origin text is returned (never the literal `*`, never
/// the pattern), so it can be echoed in `Access-Control-Allow-Origin`. `None`
/// lets the caller choose between answering `"null"` (preflight) and raising
/// [`CorsError::DisallowedOrigin`](crate::CorsError::DisallowedOrigin).
#[must_use]
pub fn match_origin<'a>(origin: &'a Origin, patterns: &[AllowPattern]) -> Option<&'a str> {
    patterns
        .iter()
        .find(|p| p.matches(origin))
        .map(|_| origin.as_str())
}
