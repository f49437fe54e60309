//! Test utilities for integration tests.
//!
//! Helpers for building routers with custom limits, issuing requests from a
//! given client address, and decoding responses.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use image::GrayImage;
use tower::ServiceExt;

use qr_barcode_service::{create_router, CodeGenerator, RateLimit, RouterConfig};

/// PNG file signature.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

// =============================================================================
// Routers
// =============================================================================

/// Router with the default limits and tracing disabled.
pub fn test_router() -> Router {
    create_router(
        CodeGenerator::default(),
        RouterConfig::new().with_tracing(false),
    )
}

/// Router with custom global and generate budgets.
pub fn router_with_limits(global: &str, generate: &str) -> Router {
    let config = RouterConfig::new()
        .with_rate_limit(global.parse::<RateLimit>().unwrap())
        .with_generate_rate_limit(generate.parse::<RateLimit>().unwrap())
        .with_tracing(false);
    create_router(CodeGenerator::default(), config)
}

// =============================================================================
// Requests
// =============================================================================

/// Address of the default test client.
pub fn client_addr(last_octet: u8) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last_octet)), 40000)
}

/// Build a GET request as if it arrived from `addr`.
pub fn get_request_from(uri: &str, addr: SocketAddr) -> Request<Body> {
    let mut request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

/// Send a GET request from the default test client.
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    get_from(router, uri, client_addr(1)).await
}

/// Send a GET request from `addr`.
///
/// The router is cloned per request; clones share limiter state.
pub async fn get_from(router: &Router, uri: &str, addr: SocketAddr) -> Response<Body> {
    router
        .clone()
        .oneshot(get_request_from(uri, addr))
        .await
        .unwrap()
}

// =============================================================================
// Responses
// =============================================================================

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = body_bytes(response).await;
    serde_json::from_slice(&body).unwrap()
}

/// Check whether data starts with the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}

/// Decode a PNG body into a grayscale image.
pub fn decode_png(data: &[u8]) -> GrayImage {
    image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .unwrap()
        .to_luma8()
}

/// Read a response header as a string.
pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}
