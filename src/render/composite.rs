//! Pixel-wise compositing helpers for the styled renderer

use image::{Rgba, RgbaImage, imageops};
use rayon::prelude::*;

/// Opaque white
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Alpha of the white wash laid over a background image
pub const OVERLAY_ALPHA: u8 = 150;

/// Turn every pure-white pixel fully transparent; every other pixel becomes
/// fully opaque. Consumes and returns the buffer.
pub fn cutout_white(mut image: RgbaImage) -> RgbaImage {
    image.par_chunks_mut(4).for_each(|px| {
        px[3] = if px[..3] == [255, 255, 255] { 0 } else { 255 };
    });
    image
}

/// Mean of the per-channel R, G and B means, on a 0-255 scale
pub fn mean_brightness(image: &RgbaImage) -> f32 {
    let pixels = image.width() as u64 * image.height() as u64;
    if pixels == 0 {
        return 0.0;
    }
    let sum: u64 = image
        .par_chunks(4)
        .map(|px| px[0] as u64 + px[1] as u64 + px[2] as u64)
        .sum();
    sum as f32 / (3 * pixels) as f32
}

/// Mean channel value of a color
pub fn color_brightness(color: [u8; 3]) -> f32 {
    color.iter().map(|&c| c as f32).sum::<f32>() / 3.0
}

/// Alpha-composite `top` over `bottom` (same size), Porter-Duff "over"
pub fn over(bottom: &mut RgbaImage, top: &RgbaImage) {
    imageops::overlay(bottom, top, 0, 0);
}

/// Opaque white canvas with `image` composited on top
pub fn flatten_onto_white(image: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), WHITE);
    over(&mut canvas, image);
    canvas
}

/// Background with the contrast-boosting white wash applied
pub fn wash(background: &RgbaImage) -> RgbaImage {
    let mut washed = flatten_onto_white(background);
    let overlay = RgbaImage::from_pixel(
        background.width(),
        background.height(),
        Rgba([255, 255, 255, OVERLAY_ALPHA]),
    );
    over(&mut washed, &overlay);
    washed
}
