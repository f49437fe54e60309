//! API integration tests for code generation and error handling.
//!
//! Tests verify:
//! - QR code and barcode generation
//! - Validation errors (missing content, invalid type, length, ASCII)
//! - Health, metrics and 404 responses

use axum::http::StatusCode;

use super::test_utils::{body_bytes, body_json, decode_png, get, header, is_png, test_router};

// =============================================================================
// QR Code Generation
// =============================================================================

#[tokio::test]
async fn test_generate_qrcode_success() {
    let router = test_router();

    let response = get(&router, "/generate?content=Hello%20World&type=qrcode").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), Some("image/png"));

    let body = body_bytes(response).await;
    assert!(is_png(&body), "Response should be a PNG");

    let img = decode_png(&body);
    assert_eq!(img.width(), img.height());
    // Box size 10 with a one-module border on each side
    assert_eq!(img.width() % 10, 0);
    assert!(img.width() >= (21 + 2) * 10);
}

#[tokio::test]
async fn test_generate_defaults_to_qrcode() {
    let router = test_router();

    let response = get(&router, "/generate?content=Hello").await;
    assert_eq!(response.status(), StatusCode::OK);

    let img = decode_png(&body_bytes(response).await);
    assert_eq!(img.width(), img.height());
}

#[tokio::test]
async fn test_generate_type_is_case_insensitive() {
    let router = test_router();

    for code_type in ["QRCODE", "QrCode", "BARCODE", "Barcode"] {
        let uri = format!("/generate?content=ABC&type={}", code_type);
        let response = get(&router, &uri).await;
        assert_eq!(response.status(), StatusCode::OK, "type={}", code_type);
    }
}

#[tokio::test]
async fn test_generate_qrcode_unicode_content() {
    let router = test_router();

    // "héllo wörld" percent-encoded
    let response = get(&router, "/generate?content=h%C3%A9llo%20w%C3%B6rld").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(is_png(&body_bytes(response).await));
}

#[tokio::test]
async fn test_generate_qrcode_at_max_length() {
    let router = test_router();

    let content = "a".repeat(1000);
    let response = get(&router, &format!("/generate?content={}", content)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_content_is_trimmed() {
    let router = test_router();

    let padded = get(&router, "/generate?content=%20%20ABC%20%20&type=barcode").await;
    let plain = get(&router, "/generate?content=ABC&type=barcode").await;
    assert_eq!(padded.status(), StatusCode::OK);

    let padded = body_bytes(padded).await;
    let plain = body_bytes(plain).await;
    assert_eq!(padded, plain);
}

#[tokio::test]
async fn test_generate_repeated_params_use_first_value() {
    let router = test_router();

    let response = get(
        &router,
        "/generate?content=ABC&content=DEF&type=barcode&type=bogus",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let repeated = body_bytes(response).await;

    let single = body_bytes(get(&router, "/generate?content=ABC&type=barcode").await).await;
    assert_eq!(repeated, single);
}

#[tokio::test]
async fn test_generate_qrcode_over_symbol_capacity() {
    let router = test_router();

    // 1000 characters pass validation but need 3000 bytes in the symbol
    let content = "%E4%B8%96".repeat(1000);
    let response = get(&router, &format!("/generate?content={}", content)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error = body_json(response).await;
    assert_eq!(error["error"], "internal_error");
    assert_eq!(error["message"], "Internal server error");
}

// =============================================================================
// Barcode Generation
// =============================================================================

#[tokio::test]
async fn test_generate_barcode_success() {
    let router = test_router();

    let response = get(&router, "/generate?content=ABC-123&type=barcode").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), Some("image/png"));

    let body = body_bytes(response).await;
    assert!(is_png(&body));

    let img = decode_png(&body);
    assert!(img.width() > img.height(), "barcode should be landscape");
    // Top-left corner is inside the margin
    assert_eq!(img.get_pixel(0, 0)[0], 255);
}

#[tokio::test]
async fn test_generate_barcode_special_characters() {
    let router = test_router();

    // "user@example.com #42" percent-encoded
    let response = get(
        &router,
        "/generate?content=user%40example.com%20%2342&type=barcode",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_barcode_control_and_del() {
    let router = test_router();

    for content in ["A%7FB", "A%09B", "A%00B%7F%1FC"] {
        let uri = format!("/generate?content={}&type=barcode", content);
        let response = get(&router, &uri).await;
        assert_eq!(response.status(), StatusCode::OK, "content={}", content);
        assert!(is_png(&body_bytes(response).await));
    }
}

#[tokio::test]
async fn test_generate_barcode_at_max_length() {
    let router = test_router();

    let content = "X".repeat(64);
    let uri = format!("/generate?content={}&type=barcode", content);
    let response = get(&router, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Validation Errors
// =============================================================================

#[tokio::test]
async fn test_missing_content() {
    let router = test_router();

    let response = get(&router, "/generate").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "content-type"), Some("application/json"));

    let error = body_json(response).await;
    assert_eq!(error["error"], "missing_content");
    assert_eq!(error["message"], "Missing 'content' parameter");
    assert_eq!(error["status"], 400);
}

#[tokio::test]
async fn test_blank_content_is_missing() {
    let router = test_router();

    for uri in ["/generate?content=", "/generate?content=%20%20%20"] {
        let response = get(&router, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let error = body_json(response).await;
        assert!(error["message"].as_str().unwrap().contains("Missing"));
    }
}

#[tokio::test]
async fn test_invalid_type() {
    let router = test_router();

    let response = get(&router, "/generate?content=abc&type=datamatrix").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_type");
    assert_eq!(
        error["message"],
        "Invalid type. Must be one of: qrcode, barcode"
    );
}

#[tokio::test]
async fn test_content_too_long() {
    let router = test_router();

    let content = "a".repeat(1001);
    let response = get(&router, &format!("/generate?content={}", content)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "content_too_long");
    assert_eq!(
        error["message"],
        "Content exceeds maximum length of 1000 characters"
    );
}

#[tokio::test]
async fn test_barcode_content_too_long() {
    let router = test_router();

    let content = "X".repeat(65);
    let uri = format!("/generate?content={}&type=barcode", content);
    let response = get(&router, &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(
        error["message"],
        "Barcode content exceeds maximum length of 64 characters"
    );
}

#[tokio::test]
async fn test_barcode_rejects_non_ascii() {
    let router = test_router();

    // "café"
    let response = get(&router, "/generate?content=caf%C3%A9&type=barcode").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_characters");
    assert!(error["message"].as_str().unwrap().contains("ASCII"));
}

// =============================================================================
// Health, Metrics and 404
// =============================================================================

#[tokio::test]
async fn test_health() {
    let router = test_router();

    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_metrics() {
    let router = test_router();

    let response = get(&router, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let metrics = body_json(response).await;
    assert_eq!(metrics["status"], "healthy");
    assert_eq!(metrics["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(metrics["config"]["max_content_length"], 1000);
    assert_eq!(metrics["config"]["rate_limit"], "100 per minute");
    assert_eq!(
        metrics["config"]["allowed_types"],
        serde_json::json!(["qrcode", "barcode"])
    );
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let router = test_router();

    let response = get(&router, "/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = body_json(response).await;
    assert_eq!(error["error"], "not_found");
    assert_eq!(
        error["message"],
        "Endpoint not found. Use /generate, /health, /metrics or /docs"
    );
}
