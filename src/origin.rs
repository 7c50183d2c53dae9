use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use url::Url;

use crate::error::CorsError;

/// A parsed `scheme://host[:port]` origin
///
/// Two origins are the same only if scheme, host and port all match. Ports are
/// compared exactly as written and never inferred from the scheme:
/// `http://x.com`, `http://x.com:80` and `http://x.com:9000` are three
/// different origins.
///
/// The raw text the origin was parsed from is kept so that it can be echoed back
/// verbatim in `Access-Control-Allow-Origin`.
#[derive(Debug, Clone)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
    raw: String,
}

impl Origin {
    /// Parse an `Origin` header value.
    ///
    /// Only absolute tuple origins are accepted. Opaque values (`null`, `file:`,
    /// `data:...`), values carrying userinfo, a path, a query or a fragment are
    /// rejected with [`CorsError::InvalidOrigin`], as is anything that is not
    /// plain ASCII (browsers serialise internationalised hosts as punycode).
    pub fn parse(value: &str) -> Result<Self, CorsError> {
        let raw = value.trim();
        let invalid = || CorsError::InvalidOrigin {
            origin: value.to_string(),
        };

        if !raw.is_ascii() || !raw.contains("://") {
            return Err(invalid());
        }
        let url = Url::parse(raw).map_err(|_| invalid())?;
        if url.cannot_be_a_base()
            || !url.username().is_empty()
            || url.password().is_some()
            || url.query().is_some()
            || url.fragment().is_some()
            || !matches!(url.path(), "" | "/")
        {
            return Err(invalid());
        }

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_ascii_lowercase(),
            _ => return Err(invalid()),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port().or_else(|| written_port(raw)),
            raw: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Build an origin from a scheme and a `Host`-header style authority
    /// (`host[:port]`).
    pub fn from_authority(scheme: &str, authority: &str) -> Result<Self, CorsError> {
        Self::parse(&format!("{}://{}", scheme, authority.trim()))
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The origin exactly as the requester sent it (minus surrounding whitespace
    /// and a trailing slash).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Origin {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.host == other.host && self.port == other.port
    }
}

impl Eq for Origin {}

impl Hash for Origin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl FromStr for Origin {
    type Err = CorsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The port spelled out in the authority, including a scheme's default port
/// that URL normalisation would otherwise drop.
fn written_port(raw: &str) -> Option<u16> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.trim_end_matches('/');
    if authority.ends_with(']') {
        return None;
    }
    let (_, port) = authority.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
