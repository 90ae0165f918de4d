//! RGB to luma for the frame detector.
//! Y = 0.299*R + 0.587*G + 0.114*B, computed as (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Frames at or above this many pixels are converted row-parallel
pub const PARALLEL_THRESHOLD: usize = 640 * 480;

#[inline]
fn luma(px: &[u8]) -> u8 {
    let lum = (COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB to one luma byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb[..width * height * 3].chunks_exact(3).map(luma).collect()
}

/// Same as [`rgb_to_grayscale`], rows processed in parallel
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src = &rgb[y * width * 3..(y + 1) * width * 3];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(3)) {
            *dst = luma(px);
        }
    });
    gray
}

/// Pick the sequential or parallel path by frame size
pub fn to_luma(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width * height >= PARALLEL_THRESHOLD {
        rgb_to_grayscale_parallel(rgb, width, height)
    } else {
        rgb_to_grayscale(rgb, width, height)
    }
}
