use crate::models::ECLevel;

/// Result alias used across the crate
pub type QrResult<T> = Result<T, QrError>;

/// Payload could not be turned into a QR symbol.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Nothing to encode
    #[error("payload is empty")]
    EmptyPayload,

    /// Payload exceeds the capacity of every allowed version
    #[error(
        "payload needs {bits} bits but the largest allowed version holds {capacity_bits} at level {level}"
    )]
    DataTooLong {
        /// Requested correction level
        level: ECLevel,
        /// Bits the segment needs at the largest allowed version
        bits: usize,
        /// Data bits that version holds
        capacity_bits: usize,
    },

    /// Explicit version out of range
    #[error("version {0} is outside 1..=40")]
    InvalidVersion(u8),
}

/// Top-level error for every fallible operation
#[derive(thiserror::Error, Debug)]
pub enum QrError {
    /// Matrix could not be built
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Input bytes are not a readable image
    #[error("image decode error: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Option outside its accepted range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// PNG encoding failed
    #[error("png export error: {0}")]
    Export(#[source] image::ImageError),
}

impl QrError {
    /// Shorthand for [`QrError::InvalidParameter`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// True for failures the user fixes by shortening the payload.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }
}

/// Non-fatal advisory: fill color and background are too close in brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastWarning {
    /// Mean brightness of the fill color (0-255)
    pub qr_brightness: f32,
    /// Mean brightness of the resized background before the overlay (0-255)
    pub background_brightness: f32,
}

impl ContrastWarning {
    /// Absolute brightness gap
    pub fn contrast(&self) -> f32 {
        (self.qr_brightness - self.background_brightness).abs()
    }
}

impl std::fmt::Display for ContrastWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "low contrast between QR and background ({:.0} vs {:.0}); try a darker or lighter QR color",
            self.qr_brightness, self.background_brightness
        )
    }
}
