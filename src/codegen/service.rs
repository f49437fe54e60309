//! Code generator dispatching validated requests to a rendering path.
//!
//! ```text
//! GenerateRequest ──► CodeGenerator::generate()
//!                        │
//!            ┌───────────┴────────────┐
//!            ▼                        ▼
//!      QrRenderer              BarcodeRenderer
//!   (qrcode, EC level L)     (barcoders Code128 + LayoutConfig)
//!            │                        │
//!            └──────────► PNG ◄───────┘
//! ```

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::GenerateError;

use super::barcode::{BarcodeRenderer, LayoutConfig};
use super::qr::QrRenderer;
use super::request::{CodeType, GenerateRequest};

/// Number of content characters echoed in log lines.
const LOG_PREVIEW_CHARS: usize = 20;

/// A rendered symbol.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// PNG-encoded image data
    pub data: Bytes,

    /// Which kind of symbol was rendered
    pub code_type: CodeType,
}

/// Renders QR codes and barcodes for validated requests.
///
/// Stateless apart from the layout, so a single instance is shared by all
/// requests.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    qr: QrRenderer,
    barcode: BarcodeRenderer,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl CodeGenerator {
    /// Create a generator using `layout` for barcodes.
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            qr: QrRenderer::new(),
            barcode: BarcodeRenderer::new(layout),
        }
    }

    /// The barcode layout in use.
    pub fn layout(&self) -> &LayoutConfig {
        self.barcode.layout()
    }

    /// Render the symbol described by `request` as PNG.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GeneratedImage, GenerateError> {
        let code_type = request.code_type();
        info!(
            code_type = code_type.as_str(),
            "Generating {} for content: {}...",
            code_type,
            preview(request.content())
        );

        let data = match code_type {
            CodeType::QrCode => self.qr.render(request.content())?,
            CodeType::Barcode => self.barcode.render(request.content())?,
        };

        debug!(
            code_type = code_type.as_str(),
            bytes = data.len(),
            "Successfully generated {}",
            code_type
        );

        Ok(GeneratedImage { data, code_type })
    }
}

/// First few characters of `content` for log output.
fn preview(content: &str) -> &str {
    match content.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}
