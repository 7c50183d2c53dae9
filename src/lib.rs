//! # brrtcors
//!
//! **brrtcors** is the Cross-Origin Resource Sharing decision engine used by
//! BRRTRouter services. It classifies requests, matches the `Origin` against an
//! allow-list and writes the `Access-Control-*` and `Vary` headers, without
//! depending on any particular web framework.
//!
//! ## Architecture
//!
//! - **[`origin`]** - `scheme://host[:port]` parsing and comparison
//! - **[`pattern`]** - allow patterns (`*`, exact origin, `[scheme://]*.domain`) and
//!   the first-match-wins matcher
//! - **[`classify`]** - non-CORS / preflight / actual classification
//! - **[`options`]** - resolved options, builder, route overrides and the
//!   global/route merge
//! - **[`config`]** - serializable configuration record and env loading
//! - **[`view`]** - request/response capability traits and adapters
//! - **[`response`]** - preflight and actual-response header synthesis
//! - **[`service`]** - [`CorsService`], the public contract
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host
//!     participant Service as CorsService
//!     participant Classify as classify
//!     participant Options as options::resolve
//!     participant Response as response
//!
//!     Host->>Service: classify(&req)
//!     Service->>Classify: Origin vs effective origin
//!     Classify-->>Host: NotCors | Preflight | Actual
//!
//!     alt Preflight
//!         Host->>Service: create_preflight_cors_response_with_route_options(&req, &route)
//!         Service->>Options: global + x-cors override
//!         Service->>Response: build_preflight_response
//!         Response-->>Host: 200, Allow-Origin = origin or "null"
//!     else Actual
//!         Host->>Service: populate_cors_response_with_route_options(&req, &mut res, route)
//!         Service->>Response: populate_cors_response
//!         Response-->>Host: headers added, or DisallowedOrigin
//!     end
//! ```
//!
//! ## Example
//!
//! ```rust
//! use brrtcors::{CorsOptionsBuilder, CorsService, HeaderVec, HttpRequest, HttpResponse};
//! use http::Method;
//!
//! let cors = CorsService::new(
//!     CorsOptionsBuilder::new()
//!         .allowed_origins(&["https://app.example.com"])
//!         .max_age(600)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let preflight = HttpRequest::new(Method::OPTIONS, HeaderVec::new())
//!     .with_header("Origin", "https://evil.example.org")
//!     .with_header("Access-Control-Request-Method", "POST");
//!
//! let resp: HttpResponse = cors.create_preflight_cors_response(&preflight);
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.get_header("Access-Control-Allow-Origin"), Some("null"));
//! ```

pub mod classify;
pub mod config;
mod error;
pub mod options;
pub mod origin;
pub mod pattern;
pub mod response;
pub mod service;
pub mod view;

pub use classify::{is_cors_request, is_preflight_request, RequestKind};
pub use config::CorsConfig;
pub use error::{CorsConfigError, CorsError};
pub use options::{
    resolve, CorsOptions, CorsOptionsBuilder, RouteCorsConfig, RouteMatch, RouteMetadata,
    ROUTE_CORS_KEY,
};
pub use origin::Origin;
pub use pattern::{match_origin, AllowPattern};
pub use service::CorsService;
pub use view::{HeaderVec, HttpRequest, HttpResponse, RequestView, ResponseView};
