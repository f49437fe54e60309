use thiserror::Error;

/// Errors produced while validating a generation request.
///
/// These are always the client's fault and map to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `content` is absent or empty after trimming
    #[error("Missing 'content' parameter")]
    MissingContent,

    /// `type` is not one of the supported code types
    #[error("Invalid type. Must be one of: {allowed}")]
    InvalidType { requested: String, allowed: String },

    /// QR content is longer than the QR limit
    #[error("Content exceeds maximum length of {max} characters")]
    ContentTooLong { length: usize, max: usize },

    /// Barcode content is longer than the barcode limit
    #[error("Barcode content exceeds maximum length of {max} characters")]
    BarcodeTooLong { length: usize, max: usize },

    /// Barcode content contains characters outside ASCII 0-127
    #[error("Barcode content must contain only ASCII characters")]
    NonAsciiBarcode,
}

impl ValidationError {
    /// Stable machine-readable identifier used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingContent => "missing_content",
            ValidationError::InvalidType { .. } => "invalid_type",
            ValidationError::ContentTooLong { .. } | ValidationError::BarcodeTooLong { .. } => {
                "content_too_long"
            }
            ValidationError::NonAsciiBarcode => "invalid_characters",
        }
    }
}

/// Errors raised by the encoders while rendering an image.
///
/// Input has already been validated when these occur, so they indicate a
/// server-side fault and map to HTTP 500.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// The QR encoder rejected the data
    #[error("QR code generation error: {message}")]
    QrEncode { message: String },

    /// The Code128 encoder rejected the data
    #[error("Barcode generation error: {message}")]
    BarcodeEncode { message: String },

    /// Writing the rendered symbol as PNG failed
    #[error("PNG encoding error: {message}")]
    ImageEncode { message: String },
}
