//! HTTP server layer for the QR/barcode service.
//!
//! This module provides the HTTP API for rendering QR codes and barcodes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │        GET /generate?content=...&type=qrcode|barcode            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │ rate_limit  │  │        routes           │  │
//! │  │ (requests)  │  │(per client) │  │ (layers, CORS, headers) │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! │                   ┌─────────────┐                               │
//! │                   │    docs     │                               │
//! │                   │ (Swagger UI)│                               │
//! │                   └─────────────┘                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod docs;
pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use docs::{build_api_spec, docs_html, API_SPEC_PATH};
pub use handlers::{
    apispec_handler, docs_handler, generate_handler, health_handler, metrics_handler,
    not_found_handler, AppState, ErrorResponse, GenerateQueryParams, HandlerError, MetricsConfig,
    MetricsResponse,
};
pub use rate_limit::{
    rate_limit_middleware, RateLimit, RateLimitExceeded, RateLimiter, DEFAULT_MAX_CLIENTS,
};
pub use routes::{create_router, RouterConfig};
