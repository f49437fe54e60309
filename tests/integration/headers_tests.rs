//! Response header integration tests.
//!
//! Tests verify:
//! - Security headers on success, error and rate-limited responses
//! - CORS headers and preflight handling

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use super::test_utils::{get, header, router_with_limits, test_router};

fn assert_security_headers(response: &axum::http::Response<Body>) {
    assert_eq!(header(response, "x-content-type-options"), Some("nosniff"));
    assert_eq!(header(response, "x-frame-options"), Some("DENY"));
    assert_eq!(header(response, "x-xss-protection"), Some("1; mode=block"));
    assert_eq!(
        header(response, "cache-control"),
        Some("no-store, no-cache, must-revalidate, max-age=0")
    );
}

// =============================================================================
// Security Headers
// =============================================================================

#[tokio::test]
async fn test_security_headers_on_image() {
    let router = test_router();

    let response = get(&router, "/generate?content=abc").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_security_headers(&response);
    assert_eq!(
        header(&response, "content-security-policy"),
        Some("default-src 'none'; img-src 'self'")
    );
}

#[tokio::test]
async fn test_security_headers_on_errors() {
    let router = test_router();

    let response = get(&router, "/generate").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_security_headers(&response);

    let response = get(&router, "/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_security_headers_on_rate_limited() {
    let router = router_with_limits("100 per minute", "1 per minute");

    get(&router, "/generate?content=abc").await;
    let response = get(&router, "/generate?content=abc").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_security_headers_on_health() {
    let router = test_router();

    let response = get(&router, "/health").await;
    assert_security_headers(&response);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let router = test_router();

    let request = Request::builder()
        .uri("/generate?content=abc")
        .header("origin", "https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));

    let methods = header(&response, "access-control-allow-methods").unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));

    let headers = header(&response, "access-control-allow-headers").unwrap();
    assert!(headers.to_lowercase().contains("content-type"));
}
