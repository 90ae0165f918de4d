use super::geometry::is_finder_region;
use crate::encoder::{QrBuilder, VersionPolicy};
use crate::error::{QrError, QrResult};
use crate::models::{ECLevel, ModuleMatrix};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use rayon::prelude::*;

const EMBED_BORDER: u32 = 4;
const EMBED_MIN_VERSION: u8 = 2;

/// Options for [`render_embedded`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedOptions {
    /// Pixels per module side
    pub box_size: u32,
    /// Channel multiplier for image blocks, in `(0, 1]`. Lower is darker.
    pub darken_factor: f32,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            box_size: 4,
            darken_factor: 0.4,
        }
    }
}

impl EmbedOptions {
    /// Reject a zero box size or a factor outside `(0, 1]`
    pub fn validate(&self) -> QrResult<()> {
        if self.box_size == 0 {
            return Err(QrError::invalid("box size must be at least 1 pixel"));
        }
        if !(self.darken_factor > 0.0 && self.darken_factor <= 1.0) {
            return Err(QrError::invalid(format!(
                "darken factor {} is outside (0, 1]",
                self.darken_factor
            )));
        }
        Ok(())
    }
}

/// Build a level-H symbol for `payload` and paint it over `image_bytes`.
pub fn render_embedded(
    payload: &str,
    image_bytes: &[u8],
    options: &EmbedOptions,
) -> QrResult<RgbImage> {
    options.validate()?;
    let source = image::load_from_memory(image_bytes).map_err(QrError::ImageDecode)?;
    render_embedded_image(payload, &source, options)
}

/// Same as [`render_embedded`] for an already decoded image.
#[tracing::instrument(skip(source, options), fields(box_size = options.box_size))]
pub fn render_embedded_image(
    payload: &str,
    source: &DynamicImage,
    options: &EmbedOptions,
) -> QrResult<RgbImage> {
    options.validate()?;
    let matrix = QrBuilder::new(ECLevel::H)
        .version(VersionPolicy::AtLeast(EMBED_MIN_VERSION))
        .box_size(options.box_size)
        .border(EMBED_BORDER)
        .build(payload)?;

    let size = matrix.pixel_size();
    let backdrop = source
        .resize_exact(size, size, FilterType::CatmullRom)
        .to_rgb8();
    tracing::debug!(version = matrix.version(), size, "embedding image");
    Ok(paint(&matrix, &backdrop, options.darken_factor))
}

/// Paint on-modules: finder blocks black, others from the darkened backdrop.
/// `backdrop` must be `pixel_size()` square.
pub fn paint(matrix: &ModuleMatrix, backdrop: &RgbImage, darken_factor: f32) -> RgbImage {
    let size = matrix.pixel_size();
    let box_size = matrix.box_size() as usize;
    let symbol = matrix.size();
    let row_len = size as usize * 3;

    let mut out = RgbImage::from_pixel(size, size, image::Rgb([255, 255, 255]));
    let src = backdrop.as_raw();
    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| {
            let my = py / box_size;
            for (mx, block) in row.chunks_mut(box_size * 3).enumerate() {
                let Some((sx, sy)) = matrix.to_symbol(mx, my) else {
                    continue;
                };
                if !matrix.is_on(sx, sy) {
                    continue;
                }
                if is_finder_region(sx, sy, symbol) {
                    block.fill(0);
                    continue;
                }
                let start = py * row_len + mx * box_size * 3;
                let len = block.len();
                for (dst, &s) in block.iter_mut().zip(&src[start..start + len]) {
                    *dst = (s as f32 * darken_factor) as u8;
                }
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn uniform(color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb(color)))
    }

    fn build(payload: &str) -> ModuleMatrix {
        QrBuilder::new(ECLevel::H)
            .version(VersionPolicy::AtLeast(2))
            .build(payload)
            .unwrap()
    }

    /// Mean luma over on-modules outside the finder blocks
    fn data_luma(matrix: &ModuleMatrix, image: &RgbImage) -> f64 {
        let b = matrix.box_size();
        let offset = matrix.border() * b;
        let mut total = 0u64;
        let mut count = 0u64;
        for y in 0..matrix.size() {
            for x in 0..matrix.size() {
                if !matrix.is_on(x, y) || is_finder_region(x, y, matrix.size()) {
                    continue;
                }
                let px = image.get_pixel(offset + x as u32 * b, offset + y as u32 * b);
                total += px.0.iter().map(|&c| c as u64).sum::<u64>();
                count += 3;
            }
        }
        total as f64 / count as f64
    }

    #[test]
    fn test_default_options() {
        let options = EmbedOptions::default();
        assert_eq!(options.box_size, 4);
        assert_eq!(options.darken_factor, 0.4);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        for factor in [0.0, -0.5, 1.5, f32::NAN] {
            let options = EmbedOptions {
                darken_factor: factor,
                ..EmbedOptions::default()
            };
            assert!(matches!(
                options.validate(),
                Err(QrError::InvalidParameter(_))
            ));
        }
        let options = EmbedOptions {
            box_size: 0,
            ..EmbedOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_minimum_version_and_size() {
        let out =
            render_embedded_image("hi", &uniform([90, 160, 220]), &EmbedOptions::default())
                .unwrap();
        // Version 2: (25 + 8) * 4
        assert_eq!(out.dimensions(), (132, 132));
    }

    #[test]
    fn test_finder_blocks_are_black() {
        let matrix = build("finder");
        let options = EmbedOptions::default();
        let out = render_embedded_image("finder", &uniform([250, 250, 250]), &options).unwrap();
        let b = matrix.box_size();
        let offset = matrix.border() * b;
        for y in 0..matrix.size() {
            for x in 0..matrix.size() {
                if matrix.is_on(x, y) && is_finder_region(x, y, matrix.size()) {
                    let px = out.get_pixel(offset + x as u32 * b + 1, offset + y as u32 * b + 1);
                    assert_eq!(px.0, [0, 0, 0], "module ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_off_modules_and_quiet_zone_white() {
        let matrix = build("white");
        let out =
            render_embedded_image("white", &uniform([10, 20, 30]), &EmbedOptions::default())
                .unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
        // Separator ring just inside the finder is off
        let b = matrix.box_size();
        let offset = matrix.border() * b;
        assert_eq!(out.get_pixel(offset + 7 * b, offset).0, [255, 255, 255]);
    }

    #[test]
    fn test_paint_samples_backdrop_per_pixel() {
        let matrix = build("per pixel");
        let size = matrix.pixel_size();
        let backdrop = RgbImage::from_fn(size, size, |x, y| {
            Rgb([(x % 251) as u8, (y % 251) as u8, ((x + y) % 251) as u8])
        });
        let out = paint(&matrix, &backdrop, 0.5);

        let b = matrix.box_size();
        let offset = matrix.border() * b;
        let mut checked = 0;
        for y in 0..matrix.size() {
            for x in 0..matrix.size() {
                if !matrix.is_on(x, y) || is_finder_region(x, y, matrix.size()) {
                    continue;
                }
                for d in 0..b {
                    let (px, py) = (offset + x as u32 * b + d, offset + y as u32 * b + (b - 1 - d));
                    let src = backdrop.get_pixel(px, py).0;
                    let expected = src.map(|c| (c as f32 * 0.5) as u8);
                    assert_eq!(out.get_pixel(px, py).0, expected, "pixel ({px}, {py})");
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_darkening_truncates() {
        let out = render_embedded_image(
            "truncate",
            &uniform([101, 101, 101]),
            &EmbedOptions::default(),
        )
        .unwrap();
        // 101 * 0.4 = 40.4
        assert!(out.pixels().any(|px| px.0 == [40, 40, 40]));
        assert!(out.pixels().all(|px| px.0 != [41, 41, 41]));
    }

    #[test]
    fn test_darkening_is_monotonic() {
        let payload = "https://example.com/monotonic";
        let matrix = build(payload);
        let source = uniform([200, 180, 160]);
        let mut last = f64::MAX;
        for factor in [1.0, 0.7, 0.4, 0.1] {
            let options = EmbedOptions {
                darken_factor: factor,
                ..EmbedOptions::default()
            };
            let out = render_embedded_image(payload, &source, &options).unwrap();
            let luma = data_luma(&matrix, &out);
            assert!(luma < last, "factor {factor} gave {luma}, previous {last}");
            last = luma;
        }
    }

    #[test]
    fn test_bad_image_bytes() {
        let err = render_embedded("x", b"not an image", &EmbedOptions::default()).unwrap_err();
        assert!(matches!(err, QrError::ImageDecode(_)));
    }
}
