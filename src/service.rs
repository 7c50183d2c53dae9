//! Public CORS contract: classification, preflight answers and actual-response
//! decoration, with optional route-scoped overrides.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::classify::{self, RequestKind};
use crate::config::CorsConfig;
use crate::error::{CorsConfigError, CorsError};
use crate::options::{extract_route_cors_config, resolve, CorsOptions, RouteMetadata};
use crate::response;
use crate::view::{RequestView, ResponseView};

/// CORS decision engine
///
/// Holds the global [`CorsOptions`] behind an `Arc`; every method is a pure
/// function of one request (and response) plus the effective options, so a
/// single service can be shared by concurrent request handlers without locking.
///
/// # Usage
///
/// ```rust
/// use brrtcors::{CorsOptionsBuilder, CorsService, HeaderVec, HttpRequest, HttpResponse, RequestKind};
/// use http::Method;
///
/// let cors = CorsService::new(
///     CorsOptionsBuilder::new()
///         .allowed_origins(&["https://*.example.com"])
///         .build()
///         .unwrap(),
/// );
///
/// let req = HttpRequest::new(Method::GET, HeaderVec::new())
///     .with_header("Host", "api.internal:8080")
///     .with_header("Origin", "https://app.example.com");
///
/// assert_eq!(cors.classify(&req).unwrap(), RequestKind::Actual);
/// let mut resp = HttpResponse::default();
/// cors.populate_cors_response(&req, &mut resp).unwrap();
/// assert_eq!(resp.get_header("access-control-allow-origin"), Some("https://app.example.com"));
/// assert_eq!(resp.get_header("vary"), Some("Origin"));
/// ```
#[derive(Debug, Clone)]
pub struct CorsService {
    options: Arc<CorsOptions>,
}

impl CorsService {
    #[must_use]
    pub fn new(options: CorsOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Build a service from a configuration record.
    pub fn from_config(config: CorsConfig) -> Result<Self, CorsConfigError> {
        CorsOptions::try_from(config).map(Self::new)
    }

    /// Global options used when a route carries no override
    #[must_use]
    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    /// Replace the global options (administrative / test use)
    ///
    /// Clones of this service made earlier keep the previous options.
    pub fn set_options(&mut self, options: CorsOptions) {
        self.options = Arc::new(options);
    }

    pub fn is_cors_request<R: RequestView + ?Sized>(&self, req: &R) -> Result<bool, CorsError> {
        classify::is_cors_request(req)
    }

    #[must_use]
    pub fn is_preflight_request<R: RequestView + ?Sized>(&self, req: &R) -> bool {
        classify::is_preflight_request(req)
    }

    /// Classify a request as non-CORS, preflight or actual cross-origin.
    pub fn classify<R: RequestView + ?Sized>(&self, req: &R) -> Result<RequestKind, CorsError> {
        classify::classify_request(req)
    }

    /// Effective options for a request: the route override (if the route
    /// carries one) merged over the global options.
    ///
    /// # Errors
    ///
    /// [`CorsError::InvalidRouteOverride`] when the route's override is malformed.
    pub fn effective_options<M: RouteMetadata + ?Sized>(
        &self,
        route: Option<&M>,
    ) -> Result<Cow<'_, CorsOptions>, CorsError> {
        let Some(route) = route else {
            return Ok(Cow::Borrowed(&*self.options));
        };
        let route_name = route.route_name().unwrap_or("<unnamed>");
        let overrides = match extract_route_cors_config(route) {
            Ok(o) => o,
            Err(e) => {
                warn!(route = route_name, error = %e, "CORS: invalid route override");
                return Err(e.into());
            }
        };
        if overrides.is_some() {
            debug!(route = route_name, "CORS: applying route override");
        }
        Ok(resolve(&self.options, overrides.as_ref()))
    }

    /// Answer a preflight with the global options. Never fails.
    #[must_use]
    pub fn create_preflight_cors_response<Req, Res>(&self, req: &Req) -> Res
    where
        Req: RequestView + ?Sized,
        Res: ResponseView + Default,
    {
        response::build_preflight_response(req, &self.options)
    }

    /// Answer a preflight with the route's override merged over the global
    /// options.
    ///
    /// # Errors
    ///
    /// Only [`CorsError::InvalidRouteOverride`]; a denied origin is answered
    /// with `Access-Control-Allow-Origin: null`.
    pub fn create_preflight_cors_response_with_route_options<Req, Res, M>(
        &self,
        req: &Req,
        route: &M,
    ) -> Result<Res, CorsError>
    where
        Req: RequestView + ?Sized,
        Res: ResponseView + Default,
        M: RouteMetadata + ?Sized,
    {
        let options = self.effective_options(Some(route))?;
        Ok(response::build_preflight_response(req, &options))
    }

    /// Decorate the response of an actual cross-origin request using the
    /// global options.
    pub fn populate_cors_response<Req, Res>(&self, req: &Req, res: &mut Res) -> Result<(), CorsError>
    where
        Req: RequestView + ?Sized,
        Res: ResponseView + ?Sized,
    {
        response::populate_cors_response(req, res, &self.options)
    }

    /// Decorate the response of an actual cross-origin request, honouring the
    /// matched route's override when one is given.
    pub fn populate_cors_response_with_route_options<Req, Res, M>(
        &self,
        req: &Req,
        res: &mut Res,
        route: Option<&M>,
    ) -> Result<(), CorsError>
    where
        Req: RequestView + ?Sized,
        Res: ResponseView + ?Sized,
        M: RouteMetadata + ?Sized,
    {
        let options = self.effective_options(route)?;
        response::populate_cors_response(req, res, &options)
    }

    /// Add `Origin` to the response's `Vary` header per the global options.
    pub fn ensure_vary_header<Res: ResponseView + ?Sized>(&self, res: &mut Res) {
        response::ensure_vary_header(res, &self.options);
    }
}

impl Default for CorsService {
    fn default() -> Self {
        Self::new(CorsOptions::default())
    }
}
