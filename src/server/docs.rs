//! API documentation: a Swagger 2.0 description and the Swagger UI page.

use serde_json::{json, Value};

use crate::codegen::{allowed_types_list, BARCODE_MAX_LENGTH, MAX_CONTENT_LENGTH};

/// Path of the machine-readable API description.
pub const API_SPEC_PATH: &str = "/apispec.json";

/// Maintainer contact advertised in the API document.
const CONTACT_EMAIL: &str = "admin@foodsaid.com";

/// Swagger UI distribution loaded by the docs page.
const SWAGGER_UI_CDN: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5";

/// Content-Security-Policy for the docs page.
///
/// Allows the Swagger UI assets from the CDN and the inline bootstrap script.
pub const DOCS_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; \
     script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
     style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
     img-src 'self' data: https://cdn.jsdelivr.net; \
     connect-src 'self'";

/// Build the Swagger 2.0 description of the API.
///
/// `host` and `schemes` are what the "Try it out" button will call, so they
/// must match how clients reach the service (e.g. behind a proxy).
pub fn build_api_spec(host: &str, schemes: &[String]) -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "title": "QR/Barcode Generation API",
            "description": "A lightweight microservice for generating QR codes and barcodes",
            "version": env!("CARGO_PKG_VERSION"),
            "contact": { "email": CONTACT_EMAIL },
        },
        "host": host,
        "basePath": "/",
        "schemes": schemes,
        "tags": [
            { "name": "generate", "description": "Code generation endpoints" },
            { "name": "health", "description": "Health check endpoints" },
        ],
        "paths": {
            "/generate": { "get": generate_operation() },
            "/health": { "get": health_operation() },
            "/metrics": { "get": metrics_operation() },
        },
        "definitions": definitions(),
    })
}

fn generate_operation() -> Value {
    let content_description = format!(
        "Text content to encode.\n\
         - QR code: max {} chars, supports any text\n\
         - Barcode: max {} chars, ASCII characters only (supports special chars like -,.,@,#,etc)",
        MAX_CONTENT_LENGTH, BARCODE_MAX_LENGTH
    );
    let type_description = format!("Type of code to generate ({})", allowed_types_list());

    let parameters = json!([
        {
            "name": "content",
            "in": "query",
            "type": "string",
            "required": true,
            "description": content_description,
            "x-example": "Hello World",
        },
        {
            "name": "type",
            "in": "query",
            "type": "string",
            "required": false,
            "description": type_description,
            "enum": ["qrcode", "barcode"],
            "default": "qrcode",
        },
    ]);

    let error = json!({ "$ref": "#/definitions/Error" });
    let responses = json!({
        "200": {
            "description": "Successfully generated image",
            "schema": { "type": "file" },
        },
        "400": { "description": "Invalid input parameters", "schema": error },
        "429": { "description": "Rate limit exceeded", "schema": error },
        "500": { "description": "Internal server error", "schema": error },
    });

    json!({
        "tags": ["generate"],
        "summary": "Generate QR code or barcode based on user input",
        "produces": ["image/png", "application/json"],
        "parameters": parameters,
        "responses": responses,
    })
}

fn health_operation() -> Value {
    json!({
        "tags": ["health"],
        "summary": "Health check endpoint for monitoring and container orchestration",
        "produces": ["text/plain"],
        "responses": {
            "200": {
                "description": "Service is healthy",
                "schema": { "type": "string", "example": "OK" },
            },
        },
    })
}

fn metrics_operation() -> Value {
    json!({
        "tags": ["health"],
        "summary": "Basic metrics endpoint for monitoring",
        "produces": ["application/json"],
        "responses": {
            "200": {
                "description": "Service metrics",
                "schema": { "$ref": "#/definitions/Metrics" },
            },
        },
    })
}

fn definitions() -> Value {
    let config = json!({
        "type": "object",
        "properties": {
            "max_content_length": { "type": "integer", "example": MAX_CONTENT_LENGTH },
            "rate_limit": { "type": "string", "example": "100 per minute" },
            "allowed_types": {
                "type": "array",
                "items": { "type": "string", "enum": ["qrcode", "barcode"] },
            },
        },
    });

    json!({
        "Error": {
            "type": "object",
            "properties": {
                "error": { "type": "string", "example": "missing_content" },
                "message": { "type": "string", "example": "Missing 'content' parameter" },
                "status": { "type": "integer", "example": 400 },
            },
        },
        "Metrics": {
            "type": "object",
            "properties": {
                "status": { "type": "string", "example": "healthy" },
                "version": { "type": "string", "example": env!("CARGO_PKG_VERSION") },
                "config": config,
            },
        },
    })
}

/// Generate the Swagger UI page pointing at [`API_SPEC_PATH`].
pub fn docs_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR/Barcode Generation API</title>
    <link rel="stylesheet" href="{cdn}/swagger-ui.css">
    <style>
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{cdn}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function () {{
            window.ui = SwaggerUIBundle({{
                url: "{spec_path}",
                dom_id: "#swagger-ui",
                deepLinking: true,
            }});
        }};
    </script>
</body>
</html>
"##,
        cdn = SWAGGER_UI_CDN,
        spec_path = API_SPEC_PATH,
    )
}
