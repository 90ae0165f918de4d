use super::url::is_url;
use crate::config::max_decode_dim;
use crate::error::{QrError, QrResult};
use crate::models::Point;
use crate::utils::grayscale::to_luma;
use image::imageops::FilterType;
use image::{GenericImageView, RgbImage};
use rqrr::PreparedImage;

/// Primary code found in one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Detection {
    /// Corners of the located symbol, empty when nothing was located
    pub polygon: Vec<Point>,
    /// Decoded text, `None` when the symbol was located but not decoded
    pub payload: Option<String>,
}

impl Detection {
    /// Nothing located and nothing decoded
    pub fn is_empty(&self) -> bool {
        self.polygon.is_empty() && self.payload.is_none()
    }
}

/// Locates and decodes the primary QR code in a frame.
pub trait FrameDetector {
    /// Primary code of `frame`, or an empty [`Detection`]
    fn detect(&mut self, frame: &RgbImage) -> Detection;
}

/// Default detector: luma conversion, then rqrr grid detection and decoding
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDetector;

impl RqrrDetector {
    /// Same as `default()`
    pub fn new() -> Self {
        Self
    }
}

impl FrameDetector for RqrrDetector {
    fn detect(&mut self, frame: &RgbImage) -> Detection {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let luma = to_luma(frame.as_raw(), w, h);
        detect_luma(&luma, w, h)
    }
}

/// Run rqrr over a luma buffer. The first grid that decodes wins; otherwise
/// the first located grid is reported without a payload.
pub fn detect_luma(luma: &[u8], width: usize, height: usize) -> Detection {
    if width == 0 || height == 0 {
        return Detection::default();
    }
    let mut prepared =
        PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);
    let grids = prepared.detect_grids();
    tracing::trace!(grids = grids.len(), "grid detection");

    let mut located = None;
    for grid in &grids {
        let polygon: Vec<Point> = grid.bounds.iter().map(|p| Point::new(p.x, p.y)).collect();
        match grid.decode() {
            Ok((_, content)) => {
                return Detection {
                    polygon,
                    payload: Some(content),
                };
            }
            Err(err) => {
                tracing::debug!(error = ?err, "located grid failed to decode");
                located.get_or_insert(polygon);
            }
        }
    }
    Detection {
        polygon: located.unwrap_or_default(),
        payload: None,
    }
}

/// Result of decoding a still image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeOutcome {
    /// A code was decoded
    pub found: bool,
    /// Decoded text
    pub payload: Option<String>,
    /// Payload looks like an http(s) URL
    pub is_url: bool,
}

impl DecodeOutcome {
    fn from_payload(payload: Option<String>) -> Self {
        Self {
            found: payload.is_some(),
            is_url: payload.as_deref().is_some_and(is_url),
            payload,
        }
    }
}

/// Decode the primary QR code of an encoded image (PNG, JPEG, ...).
///
/// Nothing found is a normal outcome (`found == false`), not an error.
/// Large images are downscaled first when `QR_MAX_DIM` is set.
#[tracing::instrument(skip_all, fields(bytes = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> QrResult<DecodeOutcome> {
    let image = image::load_from_memory(bytes).map_err(QrError::ImageDecode)?;
    let image = match max_decode_dim() {
        Some(max_dim) if image.width().max(image.height()) > max_dim => {
            tracing::debug!(max_dim, dims = ?image.dimensions(), "downscaling before decode");
            image.resize(max_dim, max_dim, FilterType::Triangle)
        }
        _ => image,
    };
    let luma = image.to_luma8();
    let (w, h) = (luma.width() as usize, luma.height() as usize);
    let detection = detect_luma(luma.as_raw(), w, h);
    Ok(DecodeOutcome::from_payload(detection.payload))
}
