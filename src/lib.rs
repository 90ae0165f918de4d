//! qr_studio - styled QR code generation and live QR tracking
//!
//! A pure Rust QR toolkit built around one encoder:
//! - Styled renders: shaped, recolored modules over an optional background
//! - Embedded renders: a level-H symbol painted with a darkened user image
//! - Still-image decoding and a debounced live tracker for frame streams
//!
//! # Example
//! ```
//! use qr_studio::{EncodeMode, EncodeRequest, RenderStyle, decode_image, encode};
//!
//! let request = EncodeRequest {
//!     payload: "https://example.com".to_string(),
//!     mode: EncodeMode::Styled(RenderStyle::default()),
//! };
//! let response = encode(&request).unwrap();
//! assert!(response.warning.is_none());
//!
//! let outcome = decode_image(&response.png).unwrap();
//! assert!(outcome.found);
//! assert!(outcome.is_url);
//! ```

#![warn(missing_docs)]

/// Environment overrides
pub mod config;
/// QR encoding (segments, Reed-Solomon, placement, masking)
pub mod encoder;
/// Error taxonomy
pub mod error;
/// Core data structures (ModuleMatrix, BitMatrix, Point, ECLevel)
pub mod models;
/// Styled and embedded rasterization, PNG export
pub mod render;
/// Still-image decoding and the live tracker
pub mod scanner;
/// File helpers for the command-line tool
pub mod tools;
/// Utility functions (grayscale)
pub mod utils;

pub use encoder::{QrBuilder, VersionPolicy};
pub use error::{ContrastWarning, EncodingError, QrError, QrResult};
pub use models::{BitMatrix, ECLevel, MaskPattern, ModuleMatrix, Point};
pub use render::{
    EmbedOptions, ModuleShape, RenderStyle, StyledRender, is_finder_region, render_embedded,
    render_styled, to_png,
};
pub use scanner::{
    DecodeOutcome, FrameDetector, FrameReport, LiveTracker, RqrrDetector, TrackerConfig,
    TrackerState, decode_image, is_url,
};

/// Level used by styled renders
pub const STYLED_EC_LEVEL: ECLevel = ECLevel::L;

/// How an [`EncodeRequest`] should be drawn
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeMode {
    /// Shaped modules, level L, version fit
    Styled(RenderStyle),
    /// Level H over the given encoded image
    Embedded {
        /// Box size and darkening
        options: EmbedOptions,
        /// Encoded image bytes (PNG, JPEG, ...)
        image: Vec<u8>,
    },
}

/// Input to [`encode`]
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeRequest {
    /// Text to encode
    pub payload: String,
    /// Rendering mode
    pub mode: EncodeMode,
}

/// Output of [`encode`]
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeResponse {
    /// PNG-encoded image
    pub png: Vec<u8>,
    /// Low-contrast advisory, styled mode only
    pub warning: Option<ContrastWarning>,
}

/// Build and render a request, returning PNG bytes.
pub fn encode(request: &EncodeRequest) -> QrResult<EncodeResponse> {
    match &request.mode {
        EncodeMode::Styled(style) => {
            let matrix = QrBuilder::new(STYLED_EC_LEVEL).build(&request.payload)?;
            let render = render_styled(&matrix, style)?;
            Ok(EncodeResponse {
                png: to_png(&render.image)?,
                warning: render.warning,
            })
        }
        EncodeMode::Embedded { options, image } => {
            let rendered = render_embedded(&request.payload, image, options)?;
            Ok(EncodeResponse {
                png: to_png(&rendered)?,
                warning: None,
            })
        }
    }
}
