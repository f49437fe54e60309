//! Code generation layer.
//!
//! Validates generation requests and renders them as PNG images.
//!
//! # Components
//!
//! - [`validate_input`]: turns raw query values into a [`GenerateRequest`]
//! - [`CodeGenerator`]: dispatches a request to the matching renderer
//! - [`QrRenderer`]: QR matrix via the `qrcode` crate
//! - [`BarcodeRenderer`]: Code128 via the `barcoders` crate, laid out with [`LayoutConfig`]
//!
//! # Example
//!
//! ```
//! use qr_barcode_service::codegen::{validate_input, CodeGenerator};
//!
//! let generator = CodeGenerator::default();
//! let request = validate_input(Some("ABC-123"), Some("barcode")).unwrap();
//! let image = generator.generate(&request).unwrap();
//! assert!(image.data.starts_with(b"\x89PNG"));
//! ```

mod barcode;
mod qr;
mod request;
mod service;

use bytes::Bytes;
use image::codecs::png::PngEncoder;
use image::GrayImage;

use crate::error::GenerateError;

pub use barcode::{
    code128_payload, mm_to_px, pt_to_px, BarcodeRenderer, LayoutConfig, DEFAULT_FONT_SIZE,
    DEFAULT_MARGIN_TOP, DEFAULT_MODULE_HEIGHT, DEFAULT_MODULE_WIDTH, DEFAULT_QUIET_ZONE,
    DEFAULT_TEXT_DISTANCE, RENDER_DPI,
};
pub use qr::{QrRenderer, QR_BORDER_SIZE, QR_BOX_SIZE};
pub use request::{
    allowed_types_list, validate_input, CodeType, GenerateRequest, ALLOWED_TYPES,
    BARCODE_MAX_LENGTH, MAX_CONTENT_LENGTH,
};
pub use service::{CodeGenerator, GeneratedImage};

/// Encode a grayscale image as PNG.
pub(crate) fn encode_png(img: GrayImage) -> Result<Bytes, GenerateError> {
    let mut output = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut output))
        .map_err(|e| GenerateError::ImageEncode {
            message: e.to_string(),
        })?;
    Ok(Bytes::from(output))
}
