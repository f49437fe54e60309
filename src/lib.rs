//! # QR/Barcode Service
//!
//! A lightweight HTTP service that renders QR codes and Code128 barcodes as
//! PNG images.
//!
//! ## Features
//!
//! - **QR codes**: up to 1000 characters of any text, error correction level L
//! - **Barcodes**: Code128 with up to 64 ASCII characters and the text printed
//!   below the bars, laid out in millimetres at 300 DPI for printing
//! - **Rate limiting**: per-client fixed windows, a global budget plus a
//!   stricter one for `/generate`
//! - **API docs**: Swagger UI at `/docs`
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`codegen`] - Input validation and the QR/barcode renderers
//! - [`server`] - Axum-based HTTP server, rate limiting and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use qr_barcode_service::{create_router, CodeGenerator, Config, RouterConfig};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Configuration is typically loaded from CLI arguments and environment
//!     let config = Config::parse();
//!
//!     let generator = CodeGenerator::new(config.layout());
//!     let router = create_router(generator, RouterConfig::from_config(&config));
//!
//!     // Start the server...
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use codegen::{
    validate_input, BarcodeRenderer, CodeGenerator, CodeType, GenerateRequest, GeneratedImage,
    LayoutConfig, QrRenderer, BARCODE_MAX_LENGTH, MAX_CONTENT_LENGTH,
};
pub use config::Config;
pub use error::{GenerateError, ValidationError};
pub use server::{
    create_router, generate_handler, health_handler, metrics_handler, AppState, ErrorResponse,
    RateLimit, RateLimiter, RouterConfig,
};
