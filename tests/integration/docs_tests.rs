//! Documentation endpoint integration tests.

use axum::http::StatusCode;

use qr_barcode_service::{create_router, CodeGenerator, RouterConfig};

use super::test_utils::{body_bytes, body_json, get, header, test_router};

#[tokio::test]
async fn test_docs_page() {
    let router = test_router();

    let response = get(&router, "/docs").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "content-type")
        .unwrap()
        .starts_with("text/html"));

    // The docs page keeps its own policy so the UI assets can load
    let csp = header(&response, "content-security-policy").unwrap();
    assert!(csp.contains("https://cdn.jsdelivr.net"));
    assert_eq!(header(&response, "x-frame-options"), Some("DENY"));

    let body = body_bytes(response).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("SwaggerUIBundle"));
    assert!(html.contains("/apispec.json"));
}

#[tokio::test]
async fn test_apispec_default_host() {
    let router = test_router();

    let response = get(&router, "/apispec.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let spec = body_json(response).await;
    assert_eq!(spec["swagger"], "2.0");
    assert_eq!(spec["host"], "localhost:8080");
    assert_eq!(spec["schemes"], serde_json::json!(["http", "https"]));
    assert!(spec["paths"]["/generate"]["get"].is_object());
}

#[tokio::test]
async fn test_apispec_custom_host() {
    let config = RouterConfig::new()
        .with_swagger("codes.example.com", vec!["https".to_string()])
        .with_tracing(false);
    let router = create_router(CodeGenerator::default(), config);

    let spec = body_json(get(&router, "/apispec.json").await).await;
    assert_eq!(spec["host"], "codes.example.com");
    assert_eq!(spec["schemes"], serde_json::json!(["https"]));
}
