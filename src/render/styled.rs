use super::composite::{
    WHITE, color_brightness, cutout_white, flatten_onto_white, mean_brightness, over, wash,
};
use super::geometry::is_finder_region;
use super::shapes::{ModuleShape, Neighbors};
use crate::error::{ContrastWarning, QrError, QrResult};
use crate::models::ModuleMatrix;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// Minimum brightness gap between fill color and background before warning
pub const CONTRAST_THRESHOLD: f32 = 50.0;

/// Appearance of a styled QR code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderStyle {
    /// Drawer for non-finder modules
    pub shape: ModuleShape,
    /// Fill color of the dark modules
    pub color: [u8; 3],
    /// Encoded background image (PNG, JPEG, ...)
    pub background: Option<Vec<u8>>,
}

impl RenderStyle {
    /// Style without a background
    pub fn new(shape: ModuleShape, color: [u8; 3]) -> Self {
        Self {
            shape,
            color,
            background: None,
        }
    }

    /// Shape for a display name such as `"Gapped Square"`. Unknown names give `Square`.
    pub fn shape_from_name(name: &str) -> ModuleShape {
        ModuleShape::from_name(name)
    }

    /// Composite over this encoded image
    pub fn with_background(mut self, bytes: Vec<u8>) -> Self {
        self.background = Some(bytes);
        self
    }
}

/// Output of [`render_styled`]
#[derive(Debug, Clone)]
pub struct StyledRender {
    /// Flattened image, every pixel fully opaque
    pub image: RgbaImage,
    /// Set when the background is too close to the fill color
    pub warning: Option<ContrastWarning>,
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional)
pub fn parse_hex_color(text: &str) -> QrResult<[u8; 3]> {
    let hex = text.trim().trim_start_matches('#');
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(QrError::invalid(format!("bad color {text:?}"))),
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| QrError::invalid(format!("bad color {text:?}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Draw the matrix with shaped modules, cut out the white, and composite
/// over the background (or plain white).
#[tracing::instrument(skip_all, fields(version = matrix.version(), shape = %style.shape))]
pub fn render_styled(matrix: &ModuleMatrix, style: &RenderStyle) -> QrResult<StyledRender> {
    let cutout = cutout_white(rasterize(matrix, style.shape, style.color));

    let Some(bytes) = &style.background else {
        return Ok(StyledRender {
            image: flatten_onto_white(&cutout),
            warning: None,
        });
    };

    let size = cutout.width();
    let background = image::load_from_memory(bytes)
        .map_err(QrError::ImageDecode)?
        .resize_exact(size, size, FilterType::CatmullRom)
        .to_rgba8();

    let warning = check_contrast(style.color, &background);
    if let Some(w) = &warning {
        tracing::warn!(contrast = w.contrast(), "{}", w);
    }

    let mut composed = wash(&background);
    over(&mut composed, &cutout);
    Ok(StyledRender {
        image: composed,
        warning,
    })
}

/// Warn when the fill color and the (unwashed) background are too close
pub fn check_contrast(color: [u8; 3], background: &RgbaImage) -> Option<ContrastWarning> {
    let warning = ContrastWarning {
        qr_brightness: color_brightness(color),
        background_brightness: mean_brightness(background),
    };
    (warning.contrast() < CONTRAST_THRESHOLD).then_some(warning)
}

/// Shaped modules in `color` on white, quiet zone included.
/// Finder modules always use square tiles.
pub fn rasterize(matrix: &ModuleMatrix, shape: ModuleShape, color: [u8; 3]) -> RgbaImage {
    let box_size = matrix.box_size();
    let pixels = matrix.pixel_size();
    let size = matrix.size();
    let offset = matrix.border() * box_size;
    let fill = Rgba([color[0], color[1], color[2], 255]);

    let mut image = RgbaImage::from_pixel(pixels, pixels, WHITE);
    for y in 0..size {
        for x in 0..size {
            if !matrix.is_on(x, y) {
                continue;
            }
            let drawer = if is_finder_region(x, y, size) {
                ModuleShape::Square
            } else {
                shape
            };
            let neighbors = Neighbors {
                north: y > 0 && matrix.is_on(x, y - 1),
                south: matrix.is_on(x, y + 1),
                east: matrix.is_on(x + 1, y),
                west: x > 0 && matrix.is_on(x - 1, y),
            };
            let x0 = offset + x as u32 * box_size;
            let y0 = offset + y as u32 * box_size;
            for py in 0..box_size {
                for px in 0..box_size {
                    if drawer.covers(px, py, box_size, neighbors) {
                        image.put_pixel(x0 + px, y0 + py, fill);
                    }
                }
            }
        }
    }
    image
}
