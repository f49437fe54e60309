//! Configuration management for the QR/barcode service.
//!
//! Every option is a command-line flag and an environment variable, with a
//! default matching the service's print-optimized layout.
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 8080)
//! - `DEBUG` - Enable debug logging (default: false)
//! - `SWAGGER_HOST` - Host advertised in the API document (default: localhost:{PORT})
//! - `SWAGGER_SCHEMES` - Comma-separated schemes for the API document (default: http,https)
//! - `RATE_LIMIT` - Per-client budget across all limited routes (default: 100 per minute)
//! - `GENERATE_RATE_LIMIT` - Per-client budget for /generate (default: 50 per minute)
//! - `MODULE_WIDTH` - Barcode module width in mm (default: 0.3)
//! - `MODULE_HEIGHT` - Barcode bar height in mm (default: 15.0)
//! - `QUIET_ZONE` - Barcode quiet zone in mm (default: 3.0)
//! - `FONT_SIZE` - Barcode text size in points, 0 hides the text (default: 12)
//! - `TEXT_DISTANCE` - Gap between bars and text in mm (default: 6.0)
//! - `MARGIN_TOP` - Barcode top margin in mm (default: 3.0)

use clap::Parser;

use crate::codegen::{
    LayoutConfig, DEFAULT_FONT_SIZE, DEFAULT_MARGIN_TOP, DEFAULT_MODULE_HEIGHT,
    DEFAULT_MODULE_WIDTH, DEFAULT_QUIET_ZONE, DEFAULT_TEXT_DISTANCE,
};
use crate::server::RateLimit;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default per-client budget across all limited routes.
pub const DEFAULT_RATE_LIMIT: &str = "100 per minute";

/// Default per-client budget for the generate endpoint.
pub const DEFAULT_GENERATE_RATE_LIMIT: &str = "50 per minute";

/// Default schemes advertised in the API document.
pub const DEFAULT_SWAGGER_SCHEMES: &str = "http,https";

// =============================================================================
// CLI Arguments
// =============================================================================

/// QR/Barcode service - renders QR codes and Code128 barcodes as PNG.
#[derive(Parser, Debug, Clone)]
#[command(name = "qr-barcode-service")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // API Documentation
    // =========================================================================
    /// Host (and port) advertised in the API document.
    ///
    /// Defaults to `localhost:{port}`.
    #[arg(long, env = "SWAGGER_HOST")]
    pub swagger_host: Option<String>,

    /// Schemes advertised in the API document (comma-separated).
    #[arg(
        long,
        env = "SWAGGER_SCHEMES",
        value_delimiter = ',',
        default_value = DEFAULT_SWAGGER_SCHEMES
    )]
    pub swagger_schemes: Vec<String>,

    // =========================================================================
    // Rate Limiting
    // =========================================================================
    /// Per-client request budget across all rate-limited routes.
    #[arg(long, default_value = DEFAULT_RATE_LIMIT, env = "RATE_LIMIT")]
    pub rate_limit: RateLimit,

    /// Per-client request budget for the generate endpoint.
    #[arg(long, default_value = DEFAULT_GENERATE_RATE_LIMIT, env = "GENERATE_RATE_LIMIT")]
    pub generate_rate_limit: RateLimit,

    // =========================================================================
    // Barcode Layout
    // =========================================================================
    /// Width of one barcode module in mm.
    #[arg(long, default_value_t = DEFAULT_MODULE_WIDTH, env = "MODULE_WIDTH")]
    pub module_width: f32,

    /// Height of the barcode bars in mm.
    #[arg(long, default_value_t = DEFAULT_MODULE_HEIGHT, env = "MODULE_HEIGHT")]
    pub module_height: f32,

    /// Blank margin left and right of the bars in mm.
    #[arg(long, default_value_t = DEFAULT_QUIET_ZONE, env = "QUIET_ZONE")]
    pub quiet_zone: f32,

    /// Font size of the text below the bars in points (0 hides the text).
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, env = "FONT_SIZE")]
    pub font_size: u32,

    /// Gap between the bars and the text in mm.
    #[arg(long, default_value_t = DEFAULT_TEXT_DISTANCE, env = "TEXT_DISTANCE")]
    pub text_distance: f32,

    /// Blank margin above the bars in mm.
    #[arg(long, default_value_t = DEFAULT_MARGIN_TOP, env = "MARGIN_TOP")]
    pub margin_top: f32,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable debug logging.
    #[arg(short, long, default_value_t = false, env = "DEBUG")]
    pub debug: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false, env = "NO_TRACING")]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        if self.swagger_schemes.is_empty() {
            return Err("SWAGGER_SCHEMES must list at least one scheme".to_string());
        }
        if let Some(scheme) = self
            .swagger_schemes
            .iter()
            .find(|s| !matches!(s.trim(), "http" | "https" | "ws" | "wss"))
        {
            return Err(format!(
                "Unsupported scheme '{}' in SWAGGER_SCHEMES (use http, https, ws or wss)",
                scheme
            ));
        }

        self.layout().validate()
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Host advertised in the API document.
    pub fn swagger_host(&self) -> String {
        self.swagger_host
            .clone()
            .unwrap_or_else(|| format!("localhost:{}", self.port))
    }

    /// Schemes advertised in the API document, trimmed.
    pub fn swagger_schemes(&self) -> Vec<String> {
        self.swagger_schemes
            .iter()
            .map(|s| s.trim().to_string())
            .collect()
    }

    /// Barcode layout assembled from the layout options.
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            module_width: self.module_width,
            module_height: self.module_height,
            quiet_zone: self.quiet_zone,
            font_size: self.font_size,
            text_distance: self.text_distance,
            margin_top: self.margin_top,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
