//! Router configuration for the QR/barcode service.
//!
//! This module defines the HTTP routes and applies middleware for rate
//! limiting, CORS and security headers.
//!
//! # Route Structure
//!
//! ```text
//! /generate        - Render a symbol (global + generate rate limits)
//! /docs            - Swagger UI (global rate limit)
//! /apispec.json    - API description (global rate limit)
//! /health          - Health check (unlimited)
//! /metrics         - Service metrics (unlimited)
//! *                - 404 JSON error
//! ```
//!
//! # Example
//!
//! ```no_run
//! use qr_barcode_service::codegen::CodeGenerator;
//! use qr_barcode_service::server::{create_router, RateLimit, RouterConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> std::io::Result<()> {
//! let config = RouterConfig::new()
//!     .with_generate_rate_limit(RateLimit::per_minute(20))
//!     .with_swagger("codes.example.com", vec!["https".to_string()]);
//!
//! let router = create_router(CodeGenerator::default(), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(
//!     listener,
//!     router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
//! )
//! .await
//! # }
//! ```

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use http::header::{
    CACHE_CONTROL, CONTENT_SECURITY_POLICY, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
    X_XSS_PROTECTION,
};
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::docs::{build_api_spec, API_SPEC_PATH};
use super::handlers::{
    apispec_handler, docs_handler, generate_handler, health_handler, metrics_handler,
    not_found_handler, AppState,
};
use super::rate_limit::{rate_limit_middleware, RateLimit, RateLimiter};
use crate::codegen::CodeGenerator;
use crate::config::Config;

/// Content-Security-Policy applied to every response that does not set its own.
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; img-src 'self'";

/// Cache-Control applied to every response that does not set its own.
pub const DEFAULT_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Per-client budget shared by all limited routes
    pub rate_limit: RateLimit,

    /// Per-client budget for `/generate`
    pub generate_rate_limit: RateLimit,

    /// Host advertised in the API document
    pub swagger_host: String,

    /// Schemes advertised in the API document
    pub swagger_schemes: Vec<String>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with the default limits.
    ///
    /// By default:
    /// - 100 requests per minute per client across limited routes
    /// - 50 requests per minute per client on `/generate`
    /// - The API document advertises `localhost:8080` over http and https
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            rate_limit: RateLimit::per_minute(100),
            generate_rate_limit: RateLimit::per_minute(50),
            swagger_host: "localhost:8080".to_string(),
            swagger_schemes: vec!["http".to_string(), "https".to_string()],
            enable_tracing: true,
        }
    }

    /// Build the router configuration from validated service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            rate_limit: config.rate_limit,
            generate_rate_limit: config.generate_rate_limit,
            swagger_host: config.swagger_host(),
            swagger_schemes: config.swagger_schemes(),
            enable_tracing: !config.no_tracing,
        }
    }

    /// Set the global per-client budget.
    pub fn with_rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Set the per-client budget for `/generate`.
    pub fn with_generate_rate_limit(mut self, limit: RateLimit) -> Self {
        self.generate_rate_limit = limit;
        self
    }

    /// Set the host and schemes advertised in the API document.
    pub fn with_swagger(mut self, host: impl Into<String>, schemes: Vec<String>) -> Self {
        self.swagger_host = host.into();
        self.swagger_schemes = schemes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// Layers, from the outside in:
/// - Request tracing (optional)
/// - Security headers
/// - CORS (answers preflight requests directly)
/// - Global rate limit on `/generate`, `/docs` and `/apispec.json`
/// - Generate rate limit on `/generate`
///
/// `/health`, `/metrics` and the 404 fallback are never rate limited.
///
/// Rate limiting keys clients by peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`. Without it
/// every request shares one budget.
pub fn create_router(generator: CodeGenerator, config: RouterConfig) -> Router {
    let api_spec = build_api_spec(&config.swagger_host, &config.swagger_schemes);
    let app_state = AppState::new(generator, config.rate_limit, api_spec);

    let global_limiter = Arc::new(RateLimiter::new(config.rate_limit));
    let generate_limiter = Arc::new(RateLimiter::new(config.generate_rate_limit));

    let generate_routes = Router::new()
        .route("/generate", get(generate_handler))
        .route_layer(middleware::from_fn_with_state(
            generate_limiter,
            rate_limit_middleware,
        ));

    // route_layer keeps the limiter off the fallback, so unknown paths
    // never consume budget
    let limited_routes = Router::new()
        .merge(generate_routes)
        .route("/docs", get(docs_handler))
        .route(API_SPEC_PATH, get(apispec_handler))
        .route_layer(middleware::from_fn_with_state(
            global_limiter,
            rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let router = Router::new()
        .merge(limited_routes)
        .merge(public_routes)
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(build_cors_layer());

    let router = apply_security_headers(router);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer: any origin, GET and OPTIONS, Content-Type header.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Add the security headers to every response.
///
/// Content-Security-Policy and Cache-Control are only defaults; handlers
/// that set their own (the docs page) keep them.
fn apply_security_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(DEFAULT_CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(DEFAULT_CACHE_CONTROL),
        ))
}

// =============================================================================
// Tests
// =============================================================================
