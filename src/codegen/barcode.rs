//! Code128 barcode rendering.
//!
//! The module pattern comes from the `barcoders` Code128 encoder. This module
//! lays the pattern out on a canvas using the physical dimensions in
//! [`LayoutConfig`] and prints the human-readable content below the bars.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                margin_top                │
//! │ quiet │ ▌▌ ▌▌▌ ▌ ▌▌  ▌▌ ▌ (bars) │ quiet  │  module_height
//! │               text_distance              │
//! │                 ABC-123                  │  font_size
//! │                margin_top                │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Physical units are converted to pixels at [`RENDER_DPI`].

use barcoders::sym::code128::Code128;
use bytes::Bytes;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{GrayImage, Luma};

use crate::error::GenerateError;

use super::encode_png;

/// Rendering resolution in dots per inch.
pub const RENDER_DPI: f32 = 300.0;

/// Default width of one barcode module in mm.
pub const DEFAULT_MODULE_WIDTH: f32 = 0.3;

/// Default height of the bars in mm.
pub const DEFAULT_MODULE_HEIGHT: f32 = 15.0;

/// Default quiet zone on the left and right in mm.
pub const DEFAULT_QUIET_ZONE: f32 = 3.0;

/// Default font size of the text row in points.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Default gap between bars and text in mm.
pub const DEFAULT_TEXT_DISTANCE: f32 = 6.0;

/// Default top (and bottom) margin in mm.
pub const DEFAULT_MARGIN_TOP: f32 = 3.0;

/// Largest accepted physical dimension in mm.
const MAX_DIMENSION_MM: f32 = 100.0;

/// Largest accepted font size in points.
const MAX_FONT_SIZE: u32 = 144;

/// Height and width of a glyph in the bitmap font.
const GLYPH_SIZE: u32 = 8;

/// Code128 code set selectors understood by the encoder.
const CODE_SET_A: char = '\u{00C0}';
const CODE_SET_B: char = '\u{0181}';

/// How the encoder spells DEL (symbol value 95 of set B).
const CODE_SET_B_DEL: char = '\u{00F7}';

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

// =============================================================================
// Layout Configuration
// =============================================================================

/// Physical layout of rendered barcodes.
///
/// Loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of one module in mm
    pub module_width: f32,

    /// Height of the bars in mm
    pub module_height: f32,

    /// Blank margin on the left and right in mm
    pub quiet_zone: f32,

    /// Font size of the human-readable text in points (0 disables the text)
    pub font_size: u32,

    /// Gap between the bars and the text in mm
    pub text_distance: f32,

    /// Blank margin above the bars (and below the text) in mm
    pub margin_top: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            module_width: DEFAULT_MODULE_WIDTH,
            module_height: DEFAULT_MODULE_HEIGHT,
            quiet_zone: DEFAULT_QUIET_ZONE,
            font_size: DEFAULT_FONT_SIZE,
            text_distance: DEFAULT_TEXT_DISTANCE,
            margin_top: DEFAULT_MARGIN_TOP,
        }
    }
}

impl LayoutConfig {
    /// Check that every dimension is usable for rendering.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("module_width", self.module_width),
            ("module_height", self.module_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 || value > MAX_DIMENSION_MM {
                return Err(format!(
                    "{} must be greater than 0 and at most {}mm",
                    name, MAX_DIMENSION_MM
                ));
            }
        }

        let non_negative = [
            ("quiet_zone", self.quiet_zone),
            ("text_distance", self.text_distance),
            ("margin_top", self.margin_top),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 || value > MAX_DIMENSION_MM {
                return Err(format!(
                    "{} must be between 0 and {}mm",
                    name, MAX_DIMENSION_MM
                ));
            }
        }

        if self.font_size > MAX_FONT_SIZE {
            return Err(format!("font_size must be at most {}pt", MAX_FONT_SIZE));
        }

        Ok(())
    }
}

/// Convert millimetres to whole pixels at [`RENDER_DPI`].
#[inline]
pub fn mm_to_px(mm: f32) -> u32 {
    (mm * RENDER_DPI / 25.4).round() as u32
}

/// Convert typographic points to whole pixels at [`RENDER_DPI`].
#[inline]
pub fn pt_to_px(pt: u32) -> u32 {
    (pt as f32 * RENDER_DPI / 72.0).round() as u32
}

// =============================================================================
// Code Set Selection
// =============================================================================

/// Build the encoder input for `content`, choosing Code128 code sets.
///
/// Printable characters use set B. Control characters (0-31) need set A;
/// once in set A, characters it shares with set B stay there to avoid
/// needless switches. DEL is passed to the encoder under its set B alias.
pub fn code128_payload(content: &str) -> String {
    let mut payload = String::with_capacity(content.len() + 2);
    let mut current = None;

    for c in content.chars() {
        let wanted = match c as u32 {
            0..=31 => CODE_SET_A,
            32..=95 if current == Some(CODE_SET_A) => CODE_SET_A,
            _ => CODE_SET_B,
        };
        if current != Some(wanted) {
            payload.push(wanted);
            current = Some(wanted);
        }
        payload.push(if c == '\x7f' { CODE_SET_B_DEL } else { c });
    }

    payload
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders Code128 barcodes as grayscale PNG images.
#[derive(Debug, Clone)]
pub struct BarcodeRenderer {
    layout: LayoutConfig,
}

impl BarcodeRenderer {
    /// Create a renderer for the given layout.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// The layout used by this renderer.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Encode `content` into its module pattern (1 = bar, 0 = space).
    pub fn encode_modules(&self, content: &str) -> Result<Vec<u8>, GenerateError> {
        let barcode =
            Code128::new(code128_payload(content)).map_err(|e| GenerateError::BarcodeEncode {
                message: format!("{:?}", e),
            })?;
        Ok(barcode.encode())
    }

    /// Encode `content` and rasterize bars and text.
    pub fn render_image(&self, content: &str) -> Result<GrayImage, GenerateError> {
        let modules = self.encode_modules(content)?;
        let layout = &self.layout;

        let module_px = mm_to_px(layout.module_width).max(1);
        let bar_height = mm_to_px(layout.module_height).max(1);
        let quiet = mm_to_px(layout.quiet_zone);
        let margin = mm_to_px(layout.margin_top);

        let width = modules.len() as u32 * module_px + 2 * quiet;

        let text_len = content.chars().count() as u32;
        let glyph_scale = if layout.font_size == 0 {
            0
        } else {
            let wanted = (pt_to_px(layout.font_size) / GLYPH_SIZE).max(1);
            let fits = width / (text_len * GLYPH_SIZE).max(1);
            wanted.min(fits).max(1)
        };
        let text_gap = if glyph_scale > 0 {
            mm_to_px(layout.text_distance)
        } else {
            0
        };
        let text_height = glyph_scale * GLYPH_SIZE;

        let height = margin + bar_height + text_gap + text_height + margin;
        let mut img = GrayImage::from_pixel(width, height, LIGHT);

        for (i, module) in modules.iter().enumerate() {
            if *module == 0 {
                continue;
            }
            let x0 = quiet + i as u32 * module_px;
            for x in x0..x0 + module_px {
                for y in margin..margin + bar_height {
                    img.put_pixel(x, y, DARK);
                }
            }
        }

        if glyph_scale > 0 {
            let text_width = text_len * GLYPH_SIZE * glyph_scale;
            let x = width.saturating_sub(text_width) / 2;
            let y = margin + bar_height + text_gap;
            draw_text(&mut img, content, x, y, glyph_scale);
        }

        Ok(img)
    }

    /// Encode `content` and return the barcode as PNG bytes.
    pub fn render(&self, content: &str) -> Result<Bytes, GenerateError> {
        let img = self.render_image(content)?;
        encode_png(img)
    }
}

/// Draw `text` with the 8x8 bitmap font, each font pixel `scale` pixels wide.
fn draw_text(img: &mut GrayImage, text: &str, x: u32, y: u32, scale: u32) {
    let advance = GLYPH_SIZE * scale;

    for (index, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        let origin = x + index as u32 * advance;

        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let px = origin + col * scale;
                let py = y + row as u32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        if px + dx < img.width() && py + dy < img.height() {
                            img.put_pixel(px + dx, py + dy, DARK);
                        }
                    }
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
