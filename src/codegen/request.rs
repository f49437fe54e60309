//! Generation requests and input validation.
//!
//! [`validate_input`] turns the raw `content` and `type` query values into a
//! normalized [`GenerateRequest`], or explains why it cannot.
//!
//! # Rules
//!
//! - `content` is trimmed; empty or missing content is rejected
//! - `type` is case-insensitive and defaults to `qrcode`
//! - QR codes accept up to [`MAX_CONTENT_LENGTH`] characters of any kind
//! - Barcodes accept up to [`BARCODE_MAX_LENGTH`] characters, ASCII 0-127 only

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// Maximum QR code content length in characters.
///
/// The QR symbol itself holds at most 2953 bytes at error-correction level L,
/// so content near this limit made of multi-byte characters can still be
/// too large to encode.
pub const MAX_CONTENT_LENGTH: usize = 1000;

/// Maximum barcode content length in characters.
pub const BARCODE_MAX_LENGTH: usize = 64;

// =============================================================================
// Code Type
// =============================================================================

/// Kind of symbol to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeType {
    /// 2D QR matrix code
    #[default]
    QrCode,

    /// 1D Code128 barcode
    Barcode,
}

/// All supported code types, in the order they are advertised.
pub const ALLOWED_TYPES: [CodeType; 2] = [CodeType::QrCode, CodeType::Barcode];

impl CodeType {
    /// Lowercase name as accepted in the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::QrCode => "qrcode",
            CodeType::Barcode => "barcode",
        }
    }

    /// Maximum content length in characters for this code type.
    pub fn max_length(&self) -> usize {
        match self {
            CodeType::QrCode => MAX_CONTENT_LENGTH,
            CodeType::Barcode => BARCODE_MAX_LENGTH,
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qrcode" => Ok(CodeType::QrCode),
            "barcode" => Ok(CodeType::Barcode),
            _ => Err(ValidationError::InvalidType {
                requested: s.to_string(),
                allowed: allowed_types_list(),
            }),
        }
    }
}

/// Comma-separated list of allowed type names, e.g. `"qrcode, barcode"`.
pub fn allowed_types_list() -> String {
    ALLOWED_TYPES
        .iter()
        .map(CodeType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Generate Request
// =============================================================================

/// A validated request to render one symbol.
///
/// Only [`validate_input`] constructs this, so holding one means the content
/// fits the limits of its code type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    content: String,
    code_type: CodeType,
}

impl GenerateRequest {
    /// The trimmed content to encode.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The symbol kind to render.
    pub fn code_type(&self) -> CodeType {
        self.code_type
    }
}

/// Validate raw query values and build a [`GenerateRequest`].
///
/// `content` is trimmed before any check. A missing `code_type` means QR code.
pub fn validate_input(
    content: Option<&str>,
    code_type: Option<&str>,
) -> Result<GenerateRequest, ValidationError> {
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(ValidationError::MissingContent);
    }

    let code_type = match code_type {
        Some(raw) => raw.parse::<CodeType>()?,
        None => CodeType::default(),
    };

    let length = content.chars().count();
    match code_type {
        CodeType::Barcode => {
            if length > BARCODE_MAX_LENGTH {
                return Err(ValidationError::BarcodeTooLong {
                    length,
                    max: BARCODE_MAX_LENGTH,
                });
            }
            if !content.is_ascii() {
                return Err(ValidationError::NonAsciiBarcode);
            }
        }
        CodeType::QrCode => {
            if length > MAX_CONTENT_LENGTH {
                return Err(ValidationError::ContentTooLong {
                    length,
                    max: MAX_CONTENT_LENGTH,
                });
            }
        }
    }

    Ok(GenerateRequest {
        content: content.to_string(),
        code_type,
    })
}

// =============================================================================
// Tests
// =============================================================================
