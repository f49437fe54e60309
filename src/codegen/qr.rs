//! QR code rendering.
//!
//! The symbol is tuned for printing: error-correction level L keeps the
//! matrix small, and a single-module border replaces the usual four-module
//! quiet zone.

use bytes::Bytes;
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::GenerateError;

use super::encode_png;

/// Pixels per QR module.
pub const QR_BOX_SIZE: u32 = 10;

/// Border around the matrix, in modules.
pub const QR_BORDER_SIZE: u32 = 1;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Renders QR codes as grayscale PNG images.
#[derive(Debug, Clone)]
pub struct QrRenderer {
    box_size: u32,
    border: u32,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl QrRenderer {
    /// Create a renderer with the print-optimized defaults.
    pub fn new() -> Self {
        Self {
            box_size: QR_BOX_SIZE,
            border: QR_BORDER_SIZE,
        }
    }

    /// Encode `content` and rasterize the matrix.
    pub fn render_image(&self, content: &str) -> Result<GrayImage, GenerateError> {
        let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L).map_err(
            |e| GenerateError::QrEncode {
                message: e.to_string(),
            },
        )?;

        let modules = code.width() as u32;
        let side = (modules + 2 * self.border) * self.box_size;
        let mut img = GrayImage::from_pixel(side, side, LIGHT);

        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32 % modules + self.border) * self.box_size;
            let y = (i as u32 / modules + self.border) * self.box_size;
            for dy in 0..self.box_size {
                for dx in 0..self.box_size {
                    img.put_pixel(x + dx, y + dy, DARK);
                }
            }
        }

        Ok(img)
    }

    /// Encode `content` and return the symbol as PNG bytes.
    pub fn render(&self, content: &str) -> Result<Bytes, GenerateError> {
        let img = self.render_image(content)?;
        encode_png(img)
    }
}
