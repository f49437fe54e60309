//! HTTP request handlers for the QR/barcode API.
//!
//! # Endpoints
//!
//! - `GET /generate?content=...&type=qrcode|barcode` - Render a symbol as PNG
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Service status and effective limits
//! - `GET /docs` - Interactive API documentation
//! - `GET /apispec.json` - API description loaded by the docs page

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::codegen::{validate_input, CodeGenerator, CodeType, ALLOWED_TYPES, MAX_CONTENT_LENGTH};
use crate::error::{GenerateError, ValidationError};

use super::docs::{docs_html, DOCS_CONTENT_SECURITY_POLICY};
use super::rate_limit::RateLimit;

/// Message returned for unexpected server-side failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned for unknown paths.
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found. Use /generate, /health, /metrics or /docs";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to handlers via Axum's State extractor.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Renders validated requests
    pub generator: Arc<CodeGenerator>,

    /// Global per-client budget, reported by `/metrics`
    pub rate_limit: RateLimit,

    /// API description served at `/apispec.json`
    pub api_spec: Arc<Value>,
}

impl AppState {
    /// Create application state around a generator.
    pub fn new(generator: CodeGenerator, rate_limit: RateLimit, api_spec: Value) -> Self {
        Self {
            generator: Arc::new(generator),
            rate_limit,
            api_spec: Arc::new(api_spec),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for generate requests.
#[derive(Debug, Default)]
pub struct GenerateQueryParams {
    /// Text to encode
    pub content: Option<String>,

    /// `qrcode` (default) or `barcode`, case-insensitive
    pub code_type: Option<String>,
}

impl GenerateQueryParams {
    /// Collect the parameters from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "content" => &mut params.content,
                "type" => &mut params.code_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_type", "rate_limit_exceeded")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Effective limits reported by `/metrics`.
#[derive(Debug, Serialize)]
pub struct MetricsConfig {
    /// Maximum QR content length in characters
    pub max_content_length: usize,

    /// Global per-client budget, e.g. "100 per minute"
    pub rate_limit: String,

    /// Accepted values of the `type` parameter
    pub allowed_types: Vec<CodeType>,
}

/// Response from the metrics endpoint.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Effective limits
    pub config: MetricsConfig,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors surfaced by the handlers.
#[derive(Debug)]
pub enum HandlerError {
    /// The request parameters were rejected
    Validation(ValidationError),

    /// The encoder failed on validated input
    Generate(GenerateError),

    /// No route matched the path
    NotFound { path: String },
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::Validation(err)
    }
}

impl From<GenerateError> for HandlerError {
    fn from(err: GenerateError) -> Self {
        HandlerError::Generate(err)
    }
}

/// Convert HandlerError to HTTP response.
///
/// - validation errors are 400 and logged at WARN
/// - unknown paths are 404 and logged at DEBUG
/// - generation errors are 500; the detail is logged at ERROR and the client
///   only sees a generic message
impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            HandlerError::Validation(err) => {
                let status = StatusCode::BAD_REQUEST;
                warn!(
                    error_type = err.code(),
                    status = status.as_u16(),
                    "Invalid input: {}",
                    err
                );
                (status, err.code(), err.to_string())
            }

            HandlerError::NotFound { path } => {
                let status = StatusCode::NOT_FOUND;
                debug!(
                    error_type = "not_found",
                    status = status.as_u16(),
                    "404 error: {}",
                    path
                );
                (status, "not_found", NOT_FOUND_MESSAGE.to_string())
            }

            HandlerError::Generate(err) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                error!(
                    error_type = "generation_error",
                    status = status.as_u16(),
                    "Server error: {}",
                    err
                );
                (status, "internal_error", INTERNAL_ERROR_MESSAGE.to_string())
            }
        };

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle generate requests.
///
/// # Endpoint
///
/// `GET /generate`
///
/// # Query Parameters
///
/// - `content`: Text to encode (QR: up to 1000 characters, barcode: up to 64 ASCII characters)
/// - `type`: `qrcode` (default) or `barcode`, case-insensitive
///
/// # Response
///
/// - `200 OK`: PNG image with `Content-Type: image/png`
/// - `400 Bad Request`: Missing content, invalid type, content too long or not ASCII
/// - `429 Too Many Requests`: Rate limit exceeded (applied by middleware)
/// - `500 Internal Server Error`: Encoder failure
pub async fn generate_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, HandlerError> {
    let query = GenerateQueryParams::from_pairs(pairs);
    let request = validate_input(query.content.as_deref(), query.code_type.as_deref())?;

    let image = state.generator.generate(&request)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], image.data).into_response())
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with plain-text body `OK`.
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handle metrics requests.
///
/// # Endpoint
///
/// `GET /metrics`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.0.5",
///   "config": {
///     "max_content_length": 1000,
///     "rate_limit": "100 per minute",
///     "allowed_types": ["qrcode", "barcode"]
///   }
/// }
/// ```
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config: MetricsConfig {
            max_content_length: MAX_CONTENT_LENGTH,
            rate_limit: state.rate_limit.to_string(),
            allowed_types: ALLOWED_TYPES.to_vec(),
        },
    })
}

/// Serve the Swagger UI page.
///
/// The page loads its assets from a CDN, so it carries its own
/// Content-Security-Policy, which the default header layer leaves in place.
pub async fn docs_handler() -> Response {
    (
        [(header::CONTENT_SECURITY_POLICY, DOCS_CONTENT_SECURITY_POLICY)],
        Html(docs_html()),
    )
        .into_response()
}

/// Serve the API description.
pub async fn apispec_handler(State(state): State<AppState>) -> Json<Value> {
    Json(state.api_spec.as_ref().clone())
}

/// Fallback for unknown paths.
pub async fn not_found_handler(uri: Uri) -> HandlerError {
    HandlerError::NotFound {
        path: uri.path().to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
